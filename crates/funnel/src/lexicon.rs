//! Bilingual keyword lists.
//!
//! Every entry is matched as a whole phrase on word boundaries after
//! normalization (see [`enrollwise_core::text`]), so accents are optional and
//! punctuation is ignored.

/// Words that mark a message as Spanish.
pub const SPANISH_WORDS: &[&str] = &[
    "hola", "gracias", "por favor", "disculpe", "buenos dias", "buenas tardes",
    "buenas noches", "como", "donde", "cuando", "cuanto", "cuanta", "cuesta",
    "precio", "programa", "curso", "cursos", "escuela", "estudiar", "quiero",
    "necesito", "informacion", "horario", "estetica", "cosmetologia", "belleza",
    "maquillaje", "uñas", "cejas", "depilacion", "si", "nada", "perfecto", "bien",
    "excelente", "muchas", "español", "espanol", "el", "los", "las", "que", "para",
    "una", "tengo", "puedo", "hay", "sobre", "clases", "usted", "ustedes", "pero",
    "tambien", "nueva", "llamo", "soy", "mi nombre",
];

/// Words that mark a message as English.
pub const ENGLISH_WORDS: &[&str] = &[
    "hello", "hi", "hey", "thanks", "thank you", "please", "how", "what", "when",
    "where", "which", "much", "cost", "price", "want", "need", "information",
    "schedule", "class", "classes", "school", "course", "the", "is", "are", "do",
    "does", "can", "yes", "interested", "program", "looking", "about", "would",
    "like", "you", "my", "and", "good", "great", "okay", "name", "start",
];

/// Characters only Spanish text uses.
pub const SPANISH_MARKS: &[char] = &['ñ', 'á', 'é', 'í', 'ó', 'ú', 'ü', '¿', '¡'];

/// Current-query keywords that ask about cost.
pub const PRICING_KEYWORDS: &[&str] = &[
    "price", "prices", "pricing", "cost", "costs", "tuition", "fee", "fees",
    "how much", "precio", "precios", "costo", "cuesta", "cuanto cuesta",
    "cuanto vale", "matricula",
];

/// Current-query keywords that ask how to pay.
pub const PAYMENT_KEYWORDS: &[&str] = &[
    "payment", "payments", "payment plan", "payment plans", "pay", "financial aid",
    "financing", "finance", "installments", "loan", "loans", "fafsa", "scholarship",
    "scholarships", "pago", "pagos", "plan de pago", "plan de pagos",
    "ayuda financiera", "financiamiento", "cuotas", "beca", "becas",
];

/// Phrases that announce intent to enroll.
pub const ENROLLMENT_INTENT: &[&str] = &[
    "sign up", "sign me up", "signing up", "enroll", "enrol", "enrolling",
    "enrollment", "register", "registration", "ready", "apply", "application",
    "interested", "want to start", "get started", "inscribir", "inscribirme",
    "inscripcion", "matricular", "matricularme", "quiero empezar", "listo", "lista",
    "aplicar",
];

/// Category words that count as a program mention on top of catalog keys.
pub const PROGRAM_CATEGORIES: &[&str] = &[
    "esthetic", "esthetics", "esthetician", "facial", "skincare", "skin care",
    "nail", "nails", "makeup", "make up", "waxing", "lashes", "eyelash",
    "cosmetology", "barber", "barbering", "cidesco", "estetica", "belleza",
    "maquillaje", "uñas", "cejas", "depilacion", "cosmetologia",
];

/// Generic interest words that only count toward the `interested` stage.
pub const GENERIC_INTEREST: &[&str] = &[
    "program", "programs", "course", "courses", "class", "classes", "interested",
    "programa", "programas", "curso", "cursos", "clases", "interesada", "interesado",
];

/// Phrases that close out a conversation after enrollment details were shared.
pub const COMPLETION_SIGNALS: &[&str] = &[
    "nope", "no", "yes that is correct", "that is correct", "that s correct",
    "thats correct", "sounds good", "looks good", "im good", "i m good",
    "that s all", "thats all", "that is all", "nothing else", "no questions",
    "all set", "no gracias", "eso es todo", "nada mas", "esta bien", "todo bien",
    "es correcto", "perfecto",
];

/// Phrases the assistant uses once it has handed off to enrollment staff.
pub const ENROLLMENT_SHARED: &[&str] = &[
    "enrollment team", "enrollment advisor", "admissions team", "admissions advisor",
    "equipo de inscripciones", "asesor de inscripciones", "asesora de inscripciones",
    "equipo de admisiones",
];

/// Campus names, street addresses, and synonyms for New York.
pub const NEW_YORK_LOCATIONS: &[&str] = &[
    "new york", "nyc", "ny", "manhattan", "broadway", "1501 broadway", "nueva york",
];

/// Campus names, street addresses, and synonyms for New Jersey.
pub const NEW_JERSEY_LOCATIONS: &[&str] = &[
    "new jersey", "nj", "jersey", "wayne", "201 willowbrook", "willowbrook",
    "nueva jersey",
];

/// Words that are never names in a contact message.
pub const NAME_FILLER: &[&str] = &[
    "my", "name", "is", "im", "i", "am", "me", "llamo", "soy", "mi", "nombre", "es",
    "and", "y", "email", "mail", "e", "phone", "number", "cell", "tel", "telefono",
    "correo", "here", "it", "its", "this", "hi", "hello", "hola", "thanks", "gracias",
    "ok", "okay", "sure", "yes", "si", "the", "at", "or", "o", "de", "numero",
    "thank", "you", "your", "go", "thing", "please", "great", "perfect", "alright",
    "got", "there", "so", "a", "an", "to", "for", "with", "contact", "info",
    "information", "details", "mobile", "cellphone", "aqui", "esta", "estan", "mis",
    "datos", "tu", "por", "favor", "claro", "perfecto", "bueno", "vale", "listo",
];
