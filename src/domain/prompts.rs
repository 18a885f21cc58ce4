//! Prompt construction for every language-backend request.
//!
//! All builders are pure functions of session state, so the exact text
//! sent to the backend is testable without any backend at all. The intake
//! prompt is the load-bearing one: it must encode the already-collected
//! fields so the backend never re-asks for them.

use super::department::Department;
use super::fields::{ComplaintFields, FieldKey};

fn fields_json(fields: &ComplaintFields) -> String {
    serde_json::to_string_pretty(fields).unwrap_or_else(|_| "{}".to_string())
}

fn field_hint(key: FieldKey) -> &'static str {
    match key {
        FieldKey::Description => "what happened",
        FieldKey::Location => "specific place/area",
        FieldKey::Time => "when it occurred",
        FieldKey::Contact => "phone number for a callback (optional)",
    }
}

/// Builds the conversational prompt for the assistant's next reply.
///
/// Encodes the collected fields, the single-question-per-turn rule, a
/// brevity constraint, and the fixed collection order. Completion (all
/// essentials present) is signalled to the backend as an instruction to
/// direct the user to submit; it is advisory, not enforced here.
pub fn intake_prompt(fields: &ComplaintFields, message_count: usize, latest: &str) -> String {
    let missing = fields.missing();
    let next_to_ask = match missing.first() {
        Some(key) => format!("Next missing detail to ask about: {} ({})", key, field_hint(*key)),
        None => "All details collected; do not ask for anything else.".to_string(),
    };

    let completion_directive = if fields.essentials_complete() {
        "You have the description, location, and time. Tell the user: \
         \"Thank you! I have all the essential details. Click 'Send Email' to submit your complaint.\""
    } else {
        "Acknowledge any details the user just provided, then ask for the next missing piece."
    };

    format!(
        "You are a professional complaint management assistant. Be concise, empathetic, \
         and avoid repetitive questions.\n\
         \n\
         ALREADY COLLECTED INFORMATION:\n{collected}\n\
         \n\
         CONVERSATION SO FAR: {message_count} messages exchanged\n\
         \n\
         RULES:\n\
         1. Ask ONLY ONE question at a time\n\
         2. NEVER repeat questions about information already collected\n\
         3. If the user provides multiple details, acknowledge them all\n\
         4. Be brief - keep responses under 2 sentences\n\
         5. Collect details in this order: description, location, time, contact (contact is optional)\n\
         \n\
         {next_to_ask}\n\
         \n\
         User's latest message: {latest}\n\
         \n\
         YOUR TASK:\n{completion_directive}\n\
         Be natural and conversational, but precise.",
        collected = fields_json(fields),
    )
}

/// Builds the structured-extraction prompt over the accumulated user text.
pub fn extraction_prompt(user_text: &str) -> String {
    format!(
        "Analyze this conversation and extract the following information in JSON format:\n\
         \n\
         USER MESSAGES:\n{user_text}\n\
         \n\
         Extract and return ONLY a JSON object with these fields (if mentioned):\n\
         {{\n\
         \x20 \"description\": \"Brief description of what happened\",\n\
         \x20 \"location\": \"Specific location/place (e.g., JNU Nagar, Rajiv Chowk Metro, Sector 15)\",\n\
         \x20 \"time\": \"When it happened (e.g., 4:00 PM, yesterday, last week)\",\n\
         \x20 \"contact\": \"Phone number if provided (10 digit number)\"\n\
         }}\n\
         \n\
         RULES:\n\
         1. Extract location even if it's part of a sentence (e.g., \"theft at JNU nagar\" -> location: \"JNU Nagar\")\n\
         2. Extract time even if embedded (e.g., \"happened at 4:00 pm\" -> time: \"4:00 PM\")\n\
         3. Only include fields that are actually mentioned\n\
         4. Return valid JSON only, no other text\n\
         5. If a field is not mentioned, omit it from the JSON\n\
         \n\
         Return the JSON:"
    )
}

/// Builds the department-classification prompt.
pub fn classification_prompt(complaint_text: &str, fields: &ComplaintFields) -> String {
    let categories = Department::ALL
        .iter()
        .map(|d| format!("- {} ({})", d.as_key(), d.topic_hints()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following complaint, classify it into one of these departments:\n\
         {categories}\n\
         \n\
         Complaint: {complaint_text}\n\
         \n\
         Additional context: {context}\n\
         \n\
         Respond with ONLY the department name (lowercase, use underscore for multi-word).",
        context = fields_json(fields),
    )
}

/// Builds the department-facing summary prompt with its four fixed headings.
pub fn summary_prompt(transcript: &str, fields: &ComplaintFields, department: Department) -> String {
    format!(
        "Based on this complaint conversation, provide:\n\
         \n\
         1. BRIEF SUMMARY (2-3 sentences max): Summarize the core issue\n\
         2. KEY DETAILS: Extract the most important facts\n\
         3. RECOMMENDED ACTION: Suggest specific steps the {department} department should take\n\
         4. PRIORITY LEVEL: Assess urgency (Low/Medium/High/Critical)\n\
         \n\
         COMPLAINT DATA:\n{data}\n\
         \n\
         CONVERSATION:\n{transcript}\n\
         \n\
         Format your response clearly with these exact headings.",
        department = department.display_name(),
        data = fields_json(fields),
    )
}

/// Builds the user-facing advice prompt (3-5 bullet points).
pub fn advice_prompt(fields: &ComplaintFields, department: Department) -> String {
    format!(
        "Based on this complaint to the {department} department, provide helpful advice \
         for the complainant.\n\
         \n\
         COMPLAINT DATA:\n{data}\n\
         \n\
         Provide:\n\
         1. What the user should expect next (response time, process)\n\
         2. Any additional steps they should take\n\
         3. Documents or evidence they should preserve\n\
         4. Their rights in this situation\n\
         \n\
         Keep it concise (3-5 bullet points), empathetic, and actionable.",
        department = department.display_name(),
        data = fields_json(fields),
    )
}
