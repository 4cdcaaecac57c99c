//! Demo data loaded by [`InMemoryStorage::seeded`](super::InMemoryStorage::seeded).

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::config::DEFAULT_USER_ID;
use crate::models::{Conversation, MedicalRecord, SpecialistId, UserProfile};

const MEMBER_NAME: &str = "Rohan Patel";

/// `(sender, date, timestamp, message)`; a `None` sender is the member.
const SCRIPT: &[(Option<SpecialistId>, &str, &str, &str)] = &[
    (Some(SpecialistId::Ruby), "01/05/24", "10:30 AM", "Hi Rohan! Welcome to Elyx! I'm Ruby, your personal concierge. I'll be coordinating your health journey with our amazing team. Ready to get started?"),
    (None, "01/05/24", "10:45 AM", "Hi Ruby! Yes, excited to begin. Travel a lot for work though - hope that won't be an issue?"),
    (Some(SpecialistId::Ruby), "01/05/24", "10:47 AM", "Not at all! We specialize in working with frequent travelers. I'll introduce you to Dr. Warren for your initial assessment, then we'll create a flexible plan. First, let's schedule your diagnostic panel - any preference for timing?"),
    (None, "01/05/24", "11:15 AM", "Mornings work best before I fly out. How about Thursday at 8 AM?"),
    (Some(SpecialistId::Warren), "01/08/24", "2:15 PM", "Hello Rohan. I've reviewed your intake form. Your cholesterol levels from last year are concerning (LDL: 165 mg/dL). We need comprehensive labs and a stress test. Thursday 8 AM works perfectly."),
    (None, "01/08/24", "2:30 PM", "That sounds serious. I fly to Bangkok on Friday - is Thursday cutting it close?"),
    (Some(SpecialistId::Warren), "01/08/24", "2:35 PM", "Not immediately dangerous, but needs addressing. Thursday morning tests are non-invasive - you'll be cleared for travel. Results ready by Friday evening, we'll discuss remotely while you're in Bangkok."),
    (Some(SpecialistId::Advik), "01/15/24", "6:00 AM", "Your first week of data is in! Sleep efficiency: 68% (target: 85%), HRV: 28ms (below average for your age). The Bangkok jet lag really hit you hard. Let's work on sleep hygiene protocols."),
    (None, "01/15/24", "8:20 AM", "Is 68% really that bad? I feel okay most mornings..."),
    (Some(SpecialistId::Carla), "01/16/24", "11:00 AM", "Hi Rohan! I saw your glucose spikes from the Bangkok trip - that street food hit differently! Let me create a travel nutrition guide. Business trips don't have to derail progress."),
    (Some(SpecialistId::Warren), "01/18/24", "4:00 PM", "Lab results are in. LDL: 168 mg/dL (higher than last year), HDL: 45 mg/dL, Triglycerides: 185 mg/dL. Stress test shows good cardiac function but we need aggressive lifestyle intervention. No medications yet."),
    (Some(SpecialistId::Neel), "01/18/24", "5:00 PM", "Rohan, I know this feels overwhelming. But you have the best team in Singapore backing you. We've seen dramatic turnarounds in executives just like you. Ready to commit to the next 90 days?"),
    (None, "01/18/24", "5:30 PM", "Let's do this. I'm all in. What's the game plan?"),
    (Some(SpecialistId::Rachel), "02/01/24", "7:00 AM", "Morning Rohan! Your personalized exercise plan is ready. Airport workouts, hotel room circuits, and city walking tours that double as cardio. No equipment needed. Ready to crush this?"),
    (Some(SpecialistId::Carla), "02/03/24", "2:50 PM", "I totally get it! Try this: \"I'll have the salmon - heard amazing things about your preparation here.\" Positions it as curiosity, not restriction. Salmon has omega-3s for cholesterol management. Win-win!"),
    (None, "02/05/24", "8:30 AM", "Tried the salmon approach at Marina Bay yesterday. Client said \"great choice\" and ordered the same! This actually works!"),
    (Some(SpecialistId::Rachel), "02/15/24", "2:35 PM", "We're starting with bodyweight! Push-ups against the wall, squats using your office chair, planks. I'll send video guides. Progressive overload - your muscles will thank you!"),
    (Some(SpecialistId::Warren), "03/15/24", "4:30 PM", "Quarterly labs are exceptional! LDL dropped from 168 to 145 mg/dL (-23 points), HDL up to 52 mg/dL, Triglycerides down to 125 mg/dL. You're responding beautifully to the protocol. How are you feeling overall?"),
    (Some(SpecialistId::Advik), "03/16/24", "2:00 PM", "Your metrics tell an incredible story! Sleep efficiency: 81% (was 68%), HRV: 38ms (was 28ms), resting HR down 8 BPM. Your cardiovascular system has fundamentally improved!"),
    (None, "04/08/24", "11:30 PM", "Team, I need help. Back-to-back trips to Mumbai and KL. Oura ring died in Mumbai, missed 2 weeks of data. Completely fell off the nutrition plan. Feeling like I'm back to square one."),
    (Some(SpecialistId::Ruby), "04/09/24", "6:45 AM", "Rohan, breathe! One rough couple of weeks doesn't erase 3 months of progress. Your body doesn't forget overnight. I'm sending a replacement Oura ring today - expedited to your office. Let's regroup."),
    (Some(SpecialistId::Carla), "04/09/24", "8:30 AM", "Mumbai and KL are my specialties! I've updated your travel guide with street food swaps and local healthy options. Even found cholesterol-friendly options at your hotel restaurants!"),
];

fn sender_details(sender: Option<SpecialistId>) -> (&'static str, Option<&'static str>, &'static str) {
    match sender {
        None => (MEMBER_NAME, None, "whatsapp"),
        Some(SpecialistId::Ruby) => ("Ruby", Some("Concierge"), "ruby"),
        Some(SpecialistId::Warren) => ("Dr. Warren", Some("Medical Strategist"), "warren"),
        Some(SpecialistId::Advik) => ("Advik", Some("Performance Scientist"), "advik"),
        Some(SpecialistId::Carla) => ("Carla", Some("Nutritionist"), "carla"),
        Some(SpecialistId::Rachel) => ("Rachel", Some("Physiotherapist"), "rachel"),
        Some(SpecialistId::Neel) => ("Neel", Some("Relationship Manager"), "neel"),
    }
}

pub fn scripted_conversations() -> Vec<Conversation> {
    SCRIPT
        .iter()
        .enumerate()
        .map(|(idx, (sender, date, timestamp, message))| {
            let (name, role, color) = sender_details(*sender);
            Conversation {
                id: format!("conv-{:03}", idx + 1),
                is_from_member: sender.is_none(),
                sender_id: *sender,
                sender_name: Some(name.to_string()),
                sender_role: role.map(str::to_string),
                sender_color: Some(color.to_string()),
                message: message.to_string(),
                timestamp: timestamp.to_string(),
                date: date.to_string(),
                month_label: None,
            }
        })
        .collect()
}

pub fn demo_profile() -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: DEFAULT_USER_ID.to_string(),
        name: MEMBER_NAME.to_string(),
        age: Some(46),
        gender: Some("Male".to_string()),
        chronic_conditions: vec![
            "Elevated Cholesterol".to_string(),
            "Hypertension (Controlled)".to_string(),
        ],
        travel_frequency: Some("Weekly business travel within APAC".to_string()),
        lifestyle_habits: Some(json!({
            "exercise": "3-4 times per week",
            "diet": "Mediterranean-Asian fusion",
            "smoking": "Never",
            "alcohol": "Social drinking (2-3 drinks per week)",
            "stress": "High due to work demands",
            "sleep": "6-7 hours per night"
        })),
        emergency_contact: Some(
            "Dr. Sarah Chen - Singapore General Hospital - +65 6222 3322".to_string(),
        ),
        created_at: now,
        updated_at: now,
    }
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

pub fn demo_medical_records(user_id: &str) -> Vec<MedicalRecord> {
    let records = [
        ("lab_result", "Total Cholesterol", "5.8", "mmol/L", "<5.2", "high",
         "Improved from 6.4 mmol/L six months ago through lifestyle interventions",
         "chat_extraction", day(2024, 12, 1)),
        ("lab_result", "LDL Cholesterol", "3.2", "mmol/L", "<2.6", "high",
         "Target is <2.6 mmol/L as per Singapore MOH guidelines for cardiovascular risk management",
         "chat_extraction", day(2024, 12, 1)),
        ("lab_result", "Blood Pressure", "125/82", "mmHg", "<120/80", "normal",
         "Well controlled with lifestyle modifications. Monitor closely during travel stress",
         "chat_extraction", day(2024, 12, 10)),
        ("medication", "Atorvastatin", "20mg", "daily", "N/A", "normal",
         "Prescribed for cholesterol management. Taking with evening meal as recommended by MOH guidelines",
         "manual_entry", day(2024, 12, 1)),
        ("allergy", "Shellfish Allergy", "Moderate", "severity", "N/A", "normal",
         "Causes hives and digestive upset. Carries EpiPen for severe reactions. Important for Singapore dining precautions",
         "manual_entry", day(2024, 5, 15)),
    ];

    records
        .into_iter()
        .enumerate()
        .map(
            |(idx, (category, title, value, unit, range, status, notes, source, recorded))| {
                MedicalRecord {
                    id: format!("med-{:03}", idx + 1),
                    user_id: user_id.to_string(),
                    category: category.to_string(),
                    title: title.to_string(),
                    value: Some(value.to_string()),
                    unit: Some(unit.to_string()),
                    normal_range: Some(range.to_string()),
                    status: Some(status.to_string()),
                    notes: Some(notes.to_string()),
                    source: source.to_string(),
                    recorded_date: recorded,
                    created_at: recorded,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_senders_are_consistent() {
        let conversations = scripted_conversations();
        assert_eq!(conversations.len(), SCRIPT.len());

        let member = &conversations[1];
        assert!(member.is_from_member);
        assert_eq!(member.sender_name.as_deref(), Some("Rohan Patel"));
        assert_eq!(member.sender_color.as_deref(), Some("whatsapp"));

        assert!(conversations
            .iter()
            .filter(|c| !c.is_from_member)
            .all(|c| c.sender_role.is_some()));
    }

    #[test]
    fn test_script_dates_parse() {
        assert!(scripted_conversations()
            .iter()
            .all(|c| c.chronological_key().0.is_some()));
    }

    #[test]
    fn test_demo_medical_records() {
        let records = demo_medical_records("default-user");
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].recorded_date, day(2024, 12, 1));
        assert!(records.iter().any(|r| r.category == "allergy"));
    }
}
