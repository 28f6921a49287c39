//! Fixed reply text

pub const GREETINGS: [&str; 3] = [
    "¡Hola! Bienvenido a Terrenos Premium. Soy tu asistente virtual y estoy aquí para ayudarte a encontrar el terreno perfecto. ¿En qué puedo asistirte?",
    "¡Hola! Es un placer saludarte. Soy el asistente de Terrenos Premium. ¿Te interesa conocer nuestras propiedades disponibles?",
    "¡Buenos días! Gracias por contactar Terrenos Premium. ¿Cómo puedo ayudarte con tu búsqueda de terrenos?",
];

pub const THANKS: [&str; 3] = [
    "¡De nada! Es un placer ayudarte. ¿Hay algo más en lo que pueda asistirte?",
    "¡Con mucho gusto! Estoy aquí para resolver todas tus dudas sobre nuestros terrenos.",
    "¡Para eso estoy! ¿Te gustaría conocer más detalles de alguna propiedad en particular?",
];

pub const FALLBACKS: [&str; 3] = [
    "Interesante pregunta. Para darte la mejor respuesta, ¿podrías ser más específico? Puedo ayudarte con información sobre propiedades, precios, ubicaciones, financiamiento o servicios.",
    "Me gustaría ayudarte mejor. ¿Estás buscando información sobre alguna propiedad en particular, precios, o tal vez quieres agendar una visita?",
    "¡Buena pregunta! Para asistirte de la mejor manera, ¿te interesa conocer sobre nuestras propiedades disponibles, opciones de financiamiento, o nuestros servicios?",
];

pub const PRICE_INCLUDES: [&str; 3] = ["Escrituración", "Asesoría legal", "Gestión de trámites"];

pub const VISIT_INCLUDES: [&str; 5] = [
    "Recorrido completo del terreno",
    "Asesor especializado",
    "Información técnica detallada",
    "Análisis de opciones de financiamiento",
    "Sin compromiso",
];

pub const FINANCING_BENEFITS: [&str; 4] = [
    "Asesoría financiera gratuita",
    "Gestión completa de trámites",
    "Seguros opcionales",
    "Sin penalización por pago anticipado",
];

pub const EXTRA_SERVICES: [&str; 4] = [
    "Valuación profesional",
    "Estudios de factibilidad",
    "Acompañamiento post-venta",
    "Referidos de constructores",
];

pub const WELCOME: &str = "¡Hola! Soy tu asistente virtual de Terrenos Premium. ¿En qué puedo ayudarte hoy? Puedo ayudarte con información sobre nuestras propiedades, precios, ubicaciones y más.";

/// (chip label, message sent when tapped)
pub const QUICK_REPLIES: [(&str, &str); 4] = [
    ("Ver Propiedades", "¿Qué propiedades tienen disponibles?"),
    ("Consultar Precios", "¿Cuáles son los precios?"),
    ("Financiamiento", "¿Qué opciones de financiamiento tienen?"),
    ("Agendar Visita", "Quiero agendar una visita"),
];
