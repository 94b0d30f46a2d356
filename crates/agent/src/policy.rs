//! Static policy text blocks.
//!
//! Nothing here decides anything: blocks are looked up by stage and
//! language and concatenated in a fixed order.

use chrono::NaiveDate;
use enrollwise_config::{CourseStart, SchoolCatalog};
use enrollwise_core::{Campus, ContactInfo, ConversationStage, Language};

/// Everything the policy text depends on.
#[derive(Debug, Clone, Copy)]
pub struct PolicyInput<'a> {
    pub stage: ConversationStage,
    pub language: Language,
    pub contact: &'a ContactInfo,
    pub location_confirmed: bool,
    pub confirmed_campus: Option<Campus>,
    pub catalog: &'a SchoolCatalog,
    pub today: NaiveDate,
    pub schedule_preview_limit: usize,
}

/// Render the full policy text.
pub fn render(input: &PolicyInput<'_>) -> String {
    let mut blocks = vec![persona(input.catalog, input.language)];

    if input.contact.has_any() {
        blocks.push(contact_state(input.contact));
    }
    blocks.push(core_rules(input.today, input.language));
    blocks.push(locations(input.catalog));
    blocks.push(programs(input.catalog));
    blocks.push(location_state(input.location_confirmed, input.confirmed_campus));
    blocks.push(stage_block(input.stage, input.contact, input.catalog, input.language));

    if input.stage == ConversationStage::Pricing {
        blocks.push(pricing_table(input.catalog));
    }
    if let Some(schedule) = upcoming_schedule(input.catalog, input.today, input.schedule_preview_limit) {
        blocks.push(schedule);
    }
    blocks.push(GUARDRAILS.to_string());
    blocks.push(format!(
        "**CONVERSATION COMPLETION:**\nWhen the user shows completion signals after enrollment info was shared, end with:\n\"{}\"",
        completion_message(input.catalog, input.language)
    ));

    blocks.join("\n\n")
}

/// The closing line, in the reply language.
pub fn completion_message(catalog: &SchoolCatalog, language: Language) -> String {
    let school = &catalog.school_name;
    match language {
        Language::English => format!(
            "Perfect! Thank you for your interest in {school}. Our enrollment advisor will reach out to you soon. \
             We look forward to welcoming you to the {school} family!"
        ),
        Language::Spanish => format!(
            "¡Perfecto! Gracias por su interés en {school}. Nuestro asesor de inscripciones se comunicará con usted pronto. \
             ¡Esperamos darle la bienvenida a la familia de {school}!"
        ),
    }
}

fn persona(catalog: &SchoolCatalog, language: Language) -> String {
    let greeting = match language {
        Language::English => "I can respond in English or Spanish, which do you prefer?",
        Language::Spanish => "Puedo responder en inglés o en español, ¿cuál prefiere?",
    };
    format!(
        "You are {}, {}'s enrollment assistant. You help prospective students learn about the school and its courses. {greeting}",
        catalog.assistant_name, catalog.school_name
    )
}

fn or_missing(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("Not provided")
}

fn contact_state(contact: &ContactInfo) -> String {
    format!(
        "**CONTACT INFO ALREADY COLLECTED:**\n\
         - Name: {}\n\
         - Email: {}\n\
         - Phone: {}\n\
         NEVER ask for this information again.",
        contact.full_name().as_deref().unwrap_or("Not provided"),
        or_missing(&contact.email),
        or_missing(&contact.phone),
    )
}

fn core_rules(today: NaiveDate, language: Language) -> String {
    let reply = match language {
        Language::English => "Reply in English.",
        Language::Spanish => "Reply in Spanish (español), using the formal \"usted\".",
    };
    format!(
        "**Core Rules:**\n\
         - Keep responses under 75 words\n\
         - End with ONE follow-up question (unless completing enrollment)\n\
         - Only mention pricing if the user asks about price, tuition, cost, or fees\n\
         - Confirm the campus (NY/NJ) before giving program details\n\
         - NEVER suggest dates before {today}\n\
         - {reply}"
    )
}

fn locations(catalog: &SchoolCatalog) -> String {
    let lines: Vec<String> = catalog
        .campuses
        .iter()
        .map(|c| format!("- {}: {}", c.label, c.address))
        .collect();
    format!("**Locations:**\n{}", lines.join("\n"))
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn programs(catalog: &SchoolCatalog) -> String {
    let lines: Vec<String> = catalog
        .programs
        .iter()
        .map(|p| {
            let campuses = p
                .campuses
                .iter()
                .map(Campus::display_name)
                .collect::<Vec<_>>()
                .join(" and ");
            match p.hours {
                Some(hours) => format!("- {} ({hours} hrs): {campuses}", title_case(&p.name)),
                None => format!("- {}: {campuses}", title_case(&p.name)),
            }
        })
        .collect();
    format!("**Programs (and where they are taught):**\n{}", lines.join("\n"))
}

fn location_state(confirmed: bool, campus: Option<Campus>) -> String {
    match (confirmed, campus) {
        (true, Some(campus)) => format!(
            "**Location:** The user chose the {} campus. Do not ask for the location again.",
            campus.display_name()
        ),
        (true, None) => "**Location:** A campus was already discussed. Do not ask for the location again.".into(),
        (false, _) => "**Location:** Not confirmed yet. Ask whether New York or New Jersey works best before program details.".into(),
    }
}

/// The stage-specific instruction block.
pub fn stage_block(
    stage: ConversationStage,
    contact: &ContactInfo,
    catalog: &SchoolCatalog,
    language: Language,
) -> String {
    let name = contact.first_name.as_deref().unwrap_or("the student");
    match stage {
        ConversationStage::Initial => "**INITIAL STAGE:**\n\
            Discover their beauty career interest and confirm location preference."
            .into(),
        ConversationStage::Interested => "**INTEREST STAGE:**\n\
            Ask about schedule preferences and confirm campus location."
            .into(),
        ConversationStage::Pricing => "**PRICING STAGE:**\n\
            Share pricing from the table below, then collect contact information naturally."
            .into(),
        ConversationStage::PaymentOptions => "**PAYMENT OPTIONS STAGE:**\n\
            Do not quote payment plan terms. Explain that the enrollment advisor will review payment \
            options and financial aid, then offer to collect their contact information."
            .into(),
        ConversationStage::EnrollmentCollection => "**ENROLLMENT COLLECTION STAGE:**\n\
            The user wants to enroll. Ask for any missing contact details (full name, email, phone) \
            in a single short question. Do not ask for details already collected."
            .into(),
        ConversationStage::EnrollmentReady => format!(
            "**ENROLLMENT READY STAGE:**\n\
             You have their contact info ({}). Summarize their enrollment journey: program, campus, \
             and schedule. Tell them the enrollment advisor will reach out, then watch for completion signals.",
            [contact.full_name(), contact.email.clone(), contact.phone.clone()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", ")
        ),
        ConversationStage::PostEnrollment => format!(
            "**POST-ENROLLMENT STAGE:**\n\
             Contact info collected, enrollment process started.\n\
             - Use their name: {name}\n\
             - Reference their program interest and campus choice\n\
             - If they say \"no\", \"nope\", or \"sounds good\" they are ready to finish"
        ),
        ConversationStage::Completion => format!(
            "**COMPLETION STAGE:**\n\
             The user has given contact info and a completion signal.\n\
             Respond with EXACTLY this message and nothing else:\n\
             \"{}\"\n\
             Do NOT ask more questions. Do NOT repeat information.",
            completion_message(catalog, language)
        ),
    }
}

fn pricing_table(catalog: &SchoolCatalog) -> String {
    if catalog.pricing.is_empty() {
        return "**Tuition:**\nTuition depends on program and schedule. Say the enrollment advisor will share exact figures."
            .into();
    }
    let lines: Vec<String> = catalog
        .pricing
        .iter()
        .map(|p| match &p.notes {
            Some(notes) => format!("- {}: ${} ({notes})", title_case(&p.program), p.tuition_usd),
            None => format!("- {}: ${}", title_case(&p.program), p.tuition_usd),
        })
        .collect();
    format!("**Tuition:**\n{}", lines.join("\n"))
}

fn course_line(course: &CourseStart) -> String {
    let mut line = format!("- {} ({}): starts {}", course.program, course.category, course.start_date);
    if let Some(end) = course.end_date {
        line.push_str(&format!(", ends {end}"));
    }
    if let Some(day) = &course.weekday {
        line.push_str(&format!(", {day}"));
    }
    if course.language == Language::Spanish {
        line.push_str(", taught in Spanish");
    }
    if let Some(campus) = course.campus {
        line.push_str(&format!(", {}", campus.display_name()));
    }
    line
}

fn upcoming_schedule(catalog: &SchoolCatalog, today: NaiveDate, limit: usize) -> Option<String> {
    let upcoming = catalog.upcoming_courses(today);
    if upcoming.is_empty() || limit == 0 {
        return None;
    }
    let lines: Vec<String> = upcoming.into_iter().take(limit).map(course_line).collect();
    Some(format!("**Upcoming Course Starts:**\n{}", lines.join("\n")))
}

const GUARDRAILS: &str = "**CRITICAL GUARDRAILS:**\n\
- Leave of absence: ONLY discuss if the user types \"leave of absence\" or \"LOA\"\n\
- Time off or breaks: \"We have an 85% attendance requirement. The enrollment team can share specific policies.\"\n\
- NEVER repeat contact information requests if already provided\n\
- Recognize completion signals: \"nope\", \"no\", \"sounds good\", \"that's correct\"\n\
- Housing: \"We don't offer housing, but both campuses have great transit access.\"\n\
- Payment plans: \"Our enrollment advisor will discuss payment options with you.\"";
