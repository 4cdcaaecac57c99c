//! Prompt templates for the concierge's model calls
//!
//! These templates use basic `format!()` interpolation for type safety.
//! Missing variables will cause compile-time errors.

use crate::models::ChatMessage;

/// Generate a prompt asking the model to classify emergency severity
///
/// The model must answer with a JSON object carrying `isEmergency`,
/// `urgencyLevel`, `symptoms` and `recommendations`.
///
/// # Arguments
/// * `message` - The member's message
/// * `medical_history` - Serialized medical history, if any
/// * `emergency_number` - Local emergency number quoted in instructions
///
/// # Example
/// ```
/// use concierge::llm::prompts::emergency_classification_prompt;
///
/// let prompt = emergency_classification_prompt("I have chest pain", None, "995");
/// assert!(prompt.contains("chest pain"));
/// assert!(prompt.contains("Call 995 immediately"));
/// ```
pub fn emergency_classification_prompt(
    message: &str,
    medical_history: Option<&str>,
    emergency_number: &str,
) -> String {
    let history = medical_history
        .map(|history| format!("Medical History: {history}\n"))
        .unwrap_or_default();

    format!(
        r#"You are a medical emergency detection system for Singapore. Analyze this message for emergency symptoms.

CRITICAL EMERGENCY SYMPTOMS (call {emergency_number} immediately):
- Chest pain with shortness of breath
- Signs of stroke (weakness, speech difficulty, facial drooping)
- Severe allergic reactions
- Choking or severe breathing difficulty
- Loss of consciousness
- Severe bleeding
- Signs of heart attack
- Severe head injury
- Diabetic emergency (very high/low blood sugar with symptoms)

Message: "{message}"
{history}
Respond in JSON format:
{{
  "isEmergency": boolean,
  "urgencyLevel": "low|medium|high|critical",
  "symptoms": ["symptom1", "symptom2"],
  "recommendations": ["recommendation1", "recommendation2"],
  "emergencyNumber": "{emergency_number}"
}}

For any critical emergency, always include "Call {emergency_number} immediately" in recommendations.
Respond with valid JSON only."#
    )
}

/// Generate a prompt for the rolling patient context summary
///
/// # Arguments
/// * `profile` - Pretty-printed profile JSON, or `None`
/// * `medical_history` - Pretty-printed recent medical records, or `None`
/// * `recent_messages` - The recency-filtered chat window
pub fn context_summary_prompt(
    profile: Option<&str>,
    medical_history: Option<&str>,
    recent_messages: &[ChatMessage],
) -> String {
    let profile = profile.unwrap_or("No profile available");
    let medical_history = medical_history.unwrap_or("No medical history available");
    let conversation = recent_messages
        .iter()
        .map(|msg| {
            format!(
                "[{}] {} ({}): {}",
                msg.timestamp,
                msg.sender_label(),
                msg.sender_role.as_deref().unwrap_or("User"),
                msg.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Generate a comprehensive medical context summary for continuing patient care:

PATIENT PROFILE:
{profile}

MEDICAL HISTORY:
{medical_history}

RECENT CONVERSATION MESSAGES:
{conversation}

Create a concise summary including:
1. Current health concerns and symptoms
2. Ongoing treatments and medications
3. Key recommendations made by specialists
4. Pending follow-ups or tests
5. Travel plans or lifestyle factors
6. Any risk factors or alerts
7. Conversation patterns and compliance

Keep summary under 500 words but include all medically relevant details."#
    )
}

/// Generate a prompt comparing a new question with recent member questions
///
/// # Example
/// ```
/// use concierge::llm::prompts::repetition_check_prompt;
///
/// let prompt = repetition_check_prompt("Is my LDL ok?", &["What was my LDL?"], 70);
/// assert!(prompt.contains("1. What was my LDL?"));
/// assert!(prompt.contains(">70% similarity"));
/// ```
pub fn repetition_check_prompt(new_message: &str, recent_questions: &[&str], threshold: u8) -> String {
    let questions = recent_questions
        .iter()
        .enumerate()
        .map(|(idx, question)| format!("{}. {}", idx + 1, question))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Compare this new question with recent questions to detect repetition:

NEW QUESTION: "{new_message}"

RECENT QUESTIONS:
{questions}

Respond in JSON format:
{{
  "isRepetitive": boolean,
  "mostSimilarQuestion": "question text or null",
  "similarity": number (0-100),
  "reason": "explanation of similarity or difference"
}}

Consider questions repetitive if they ask about the same health concern, symptom, or topic with >{threshold}% similarity.
Respond with valid JSON only."#
    )
}

/// Generate a prompt that revisits a previously answered question
pub fn reference_response_prompt(
    specialist_name: &str,
    specialist_role: &str,
    new_message: &str,
    previous_response: &str,
) -> String {
    format!(
        r#"The user is asking a similar question to one answered recently. Provide an updated response that:
1. References the previous answer
2. Adds any new relevant information
3. Avoids exact repetition
4. Maintains the specialist's voice

SPECIALIST: {specialist_name} ({specialist_role})
NEW QUESTION: "{new_message}"
PREVIOUS RESPONSE: "{previous_response}"

Create a response that acknowledges the previous discussion and provides updated or clarified information."#
    )
}

/// Generate a prompt for a structured session summary
///
/// # Example
/// ```
/// use concierge::llm::prompts::session_summary_prompt;
///
/// let prompt = session_summary_prompt(&[]);
/// assert!(prompt.contains("\"keyTopics\""));
/// ```
pub fn session_summary_prompt(session_messages: &[ChatMessage]) -> String {
    let transcript = session_messages
        .iter()
        .map(|msg| format!("[{}] {}: {}", msg.timestamp, msg.sender_label(), msg.message))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze this conversation session and create a structured summary:

SESSION MESSAGES:
{transcript}

Respond in JSON format:
{{
  "conversationSummary": "Brief summary of main discussion points",
  "keyTopics": ["topic1", "topic2"],
  "specialistsInvolved": ["specialist1", "specialist2"],
  "actionItems": ["action1", "action2"],
  "followUpNeeded": ["followup1", "followup2"]
}}

Respond with valid JSON only."#
    )
}

/// Assemble the system instruction for a specialist's advice turn
///
/// # Arguments
/// * `instructions` - Persona instructions for the specialist
/// * `display_name` - "Name (Role)" header the answer must start with
/// * `regional_context` - Seasonal and climate notes
/// * `patient_context` - Context summary for the member
/// * `conversation_note` - Repetition note or "This is a new question."
pub fn specialist_system_prompt(
    instructions: &str,
    display_name: &str,
    regional_context: &str,
    patient_context: &str,
    conversation_note: &str,
) -> String {
    format!(
        r#"{instructions}

SINGAPORE MEDICAL CONTEXT:
{regional_context}

PATIENT CONTEXT:
{patient_context}

CONVERSATION NOTES:
{conversation_note}

CRITICAL RULES:
1. Always start response with your name and role: "{display_name}:"
2. Cite credible sources (MOH, WHO, UpToDate, Singapore clinical guidelines)
3. Keep responses conversational but professional
4. Consider Singapore's climate, culture, and healthcare system
5. Adapt advice based on patient's travel frequency and lifestyle
6. Reference previous conversations when relevant

If question is outside your expertise, briefly refer to the appropriate team member."#
    )
}
