//! Response Synthesis
//!
//! Maps an intent and its entities to a Spanish reply. Catalog-derived replies
//! are rendered from the knowledge base on every call; small-talk replies come
//! from fixed pools through a [`TemplateSelector`].

mod selector;
pub mod templates;

pub use selector::{FixedSelector, RandomSelector, SeededSelector, TemplateSelector};

use std::sync::Arc;

use serde::Serialize;

use terrenos_core::{Entities, IntentLabel, KnowledgeBase, Property};

/// Suggestion chip shown under the chat window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    pub label: &'static str,
    pub message: &'static str,
}

/// Greeting shown when the chat window opens
pub fn welcome_message() -> &'static str {
    templates::WELCOME
}

pub fn quick_replies() -> Vec<QuickReply> {
    templates::QUICK_REPLIES
        .iter()
        .map(|&(label, message)| QuickReply { label, message })
        .collect()
}

/// Templated reply generator over a shared catalog
#[derive(Clone)]
pub struct ResponseSynthesizer {
    kb: Arc<KnowledgeBase>,
    selector: Arc<dyn TemplateSelector>,
}

impl ResponseSynthesizer {
    pub fn new(kb: Arc<KnowledgeBase>, selector: Arc<dyn TemplateSelector>) -> Self {
        Self { kb, selector }
    }

    /// Synthesizer with uniformly random small-talk
    pub fn with_random_templates(kb: Arc<KnowledgeBase>) -> Self {
        Self::new(kb, Arc::new(RandomSelector))
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    /// Reply for a classified message
    ///
    /// `normalized` is the text the intent was detected on; current
    /// generators do not read it.
    pub fn respond(&self, intent: IntentLabel, entities: &Entities, _normalized: &str) -> String {
        match intent {
            IntentLabel::Greeting => self.pick(&templates::GREETINGS),
            IntentLabel::PropertyInquiry => self.property_response(entities),
            IntentLabel::PriceInquiry => self.price_response(),
            IntentLabel::LocationInquiry => self.location_response(),
            IntentLabel::VisitRequest => self.visit_response(),
            IntentLabel::FinancingInquiry => self.financing_response(),
            IntentLabel::ContactRequest => self.contact_response(),
            IntentLabel::ServicesInquiry => self.services_response(),
            IntentLabel::Thanks => self.pick(&templates::THANKS),
            IntentLabel::General => self.default_response(),
        }
    }

    /// Reply for an intent given by name; unknown names get the default reply
    pub fn respond_to_label(&self, label: &str, entities: &Entities, normalized: &str) -> String {
        match IntentLabel::parse(label) {
            Some(intent) => self.respond(intent, entities, normalized),
            None => {
                tracing::debug!(label = %label, "Unknown intent label, using default reply");
                self.default_response()
            }
        }
    }

    pub fn default_response(&self) -> String {
        self.pick(&templates::FALLBACKS)
    }

    fn pick(&self, pool: &[&str]) -> String {
        pool[self.selector.pick(pool.len()) % pool.len()].to_string()
    }

    fn property_response(&self, entities: &Entities) -> String {
        if let Some(category) = entities.property_type {
            if let Some(property) = self.kb.properties_in(category).next() {
                return property_card(property);
            }
        }

        let mut response = "🏆 **Nuestras Propiedades Disponibles:**\n\n".to_string();
        for property in &self.kb.properties {
            response.push_str(&format!("🏠 **{}**\n", property.name));
            response.push_str(&format!(
                "   📍 {} | 📐 {} | 💰 {}\n\n",
                property.location, property.area_text, property.price_text
            ));
        }
        response.push_str(
            "¿Cuál de estas propiedades te interesa más? Puedo darte información detallada de cualquiera.",
        );
        response
    }

    fn price_response(&self) -> String {
        let mut response = "💰 **Lista de Precios Actualizada:**\n\n".to_string();
        for property in self.kb.properties_by_price() {
            response.push_str(&format!(
                "• **{}**: {} ({})\n",
                property.name, property.price_text, property.area_text
            ));
        }

        response.push_str("\n📋 **Todos los precios incluyen:**\n");
        for item in templates::PRICE_INCLUDES {
            response.push_str(&format!("✅ {}\n", item));
        }
        response.push_str(&format!(
            "\n💳 Ofrecemos opciones de financiamiento desde {}% de enganche. ¿Te interesa conocer las opciones de pago?",
            self.kb.financing.down_payment_min_percent
        ));
        response
    }

    fn location_response(&self) -> String {
        let company = &self.kb.company;
        let mut response = "📍 **Ubicaciones de Nuestras Propiedades:**\n\n".to_string();
        for property in &self.kb.properties {
            response.push_str(&format!("🏠 **{}**: {}\n", property.name, property.location));
        }

        response.push_str("\n🏢 **Nuestra Oficina:**\n");
        response.push_str(&format!("📍 {}\n", company.address));
        response.push_str(&format!("🕒 {}\n\n", company.hours));
        response.push_str(
            "¿Te gustaría que te envíe la ubicación exacta de alguna propiedad o agendar una visita?",
        );
        response
    }

    fn visit_response(&self) -> String {
        let company = &self.kb.company;
        let mut response = "📅 **¡Excelente! Agenda tu visita:**\n\n".to_string();
        response.push_str(
            "Para programar una visita a cualquiera de nuestras propiedades, puedes contactarnos por:\n\n",
        );
        response.push_str(&format!("📞 **Teléfono**: {}\n", company.phone));
        response.push_str(&format!("📱 **WhatsApp**: {}\n", company.whatsapp_link()));
        response.push_str(&format!("📧 **Email**: {}\n\n", company.email));
        response.push_str(&format!("🕒 **Horarios de visita:**\n{}\n\n", company.hours));

        response.push_str("**¿Qué incluye la visita?**\n");
        for item in templates::VISIT_INCLUDES {
            response.push_str(&format!("✅ {}\n", item));
        }
        response.push_str("\n¿Qué propiedad te gustaría visitar?");
        response
    }

    fn financing_response(&self) -> String {
        let financing = &self.kb.financing;
        let terms: Vec<String> = financing.terms_months.iter().map(u32::to_string).collect();

        let mut response = "💳 **Opciones de Financiamiento Disponibles:**\n\n".to_string();
        response.push_str(&format!(
            "💰 **Enganche mínimo**: {}%\n",
            financing.down_payment_min_percent
        ));
        response.push_str(&format!(
            "📅 **Plazos disponibles**: {} meses\n\n",
            terms.join(", ")
        ));

        response.push_str("🏦 **Instituciones financieras aliadas:**\n");
        for bank in &financing.banks {
            response.push_str(&format!("• {}\n", bank));
        }

        response.push_str("\n📊 **Tasas de interés aproximadas:**\n");
        for (category, rate) in &financing.interest_rates {
            response.push_str(&format!(
                "• {}: {}% anual\n",
                category.display_name(),
                format_rate(*rate)
            ));
        }

        response.push_str("\n✅ **Beneficios adicionales:**\n");
        for item in templates::FINANCING_BENEFITS {
            response.push_str(&format!("• {}\n", item));
        }
        response.push_str("\n¿Te gustaría una cotización personalizada?");
        response
    }

    fn contact_response(&self) -> String {
        let company = &self.kb.company;
        let mut response = "📞 **Información de Contacto:**\n\n".to_string();
        response.push_str(&format!("**📱 Teléfono**: {}\n", company.phone));
        response.push_str(&format!("**📧 Email**: {}\n", company.email));
        response.push_str(&format!("**📍 Dirección**: {}\n", company.address));
        response.push_str(&format!("**🕒 Horarios**: {}\n\n", company.hours));

        response.push_str("**💬 Contacto Rápido:**\n");
        response.push_str(&format!("• WhatsApp: {}\n", company.whatsapp_link()));
        for (network, handle) in &company.social_media {
            response.push_str(&format!("• {}: {}\n", capitalize(network), handle));
        }

        response.push_str("\n**🎯 ¿Cómo prefieres que te contactemos?**\n");
        response.push_str(
            "Podemos llamarte, enviarte información por email, o agendar una cita presencial.",
        );
        response
    }

    fn services_response(&self) -> String {
        let mut response = "🏆 **Nuestros Servicios Profesionales:**\n\n".to_string();
        for service in &self.kb.services {
            response.push_str(&format!("🔹 **{}**\n", service.name));
            response.push_str(&format!("   {}\n\n", service.description));
        }

        response.push_str("✨ **Servicios adicionales:**\n");
        for item in templates::EXTRA_SERVICES {
            response.push_str(&format!("• {}\n", item));
        }
        response.push_str("\n¿Qué servicio te interesa más?");
        response
    }
}

fn property_card(property: &Property) -> String {
    let features: Vec<String> = property
        .top_features(4)
        .iter()
        .map(|f| format!("✅ {}", f))
        .collect();

    format!(
        "Tenemos el **{}** disponible:\n\n\
         📍 **Ubicación**: {}\n\
         📐 **Área**: {}\n\
         💰 **Precio**: {}\n\n\
         **Características principales:**\n\
         {}\n\n\
         {}\n\n\
         ¿Te gustaría más información sobre esta propiedad o agendar una visita?",
        property.name,
        property.location,
        property.area_text,
        property.price_text,
        features.join("\n"),
        property.description
    )
}

/// Rates keep one decimal when whole (`10.0`), otherwise print as is (`8.5`)
fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{:.1}", rate)
    } else {
        rate.to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
