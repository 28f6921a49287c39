//! Knowledge base: the immutable catalog the assistant answers from
//!
//! Constructed once at startup (built-in or loaded from YAML by the config
//! crate) and shared read-only behind an `Arc` for the life of the process.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Availability, Coordinates, Property, PropertyCategory};

/// Company contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub hours: String,
    /// WhatsApp handle (digits only)
    pub whatsapp: String,
    /// Network name -> handle, rendered in key order
    #[serde(default)]
    pub social_media: BTreeMap<String, String>,
}

impl CompanyInfo {
    pub fn whatsapp_link(&self) -> String {
        format!("https://wa.me/{}", self.whatsapp)
    }
}

/// A professional service offered alongside the listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub name: String,
    pub description: String,
}

/// Financing terms offered on every listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingTerms {
    /// Minimum down payment, percent of price
    pub down_payment_min_percent: u32,
    /// Annual interest rate (percent) per category
    #[serde(default)]
    pub interest_rates: BTreeMap<PropertyCategory, f64>,
    /// Available terms in months, ascending
    #[serde(default)]
    pub terms_months: Vec<u32>,
    /// Partner institutions
    #[serde(default)]
    pub banks: Vec<String>,
}

/// The full catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub properties: Vec<Property>,
    pub company: CompanyInfo,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    pub financing: FinancingTerms,
}

impl KnowledgeBase {
    /// Properties of a category, in catalog order
    pub fn properties_in(&self, category: PropertyCategory) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(move |p| p.category == category)
    }

    /// Properties sorted ascending by price (stable for equal prices)
    pub fn properties_by_price(&self) -> Vec<&Property> {
        let mut sorted: Vec<&Property> = self.properties.iter().collect();
        sorted.sort_by_key(|p| p.price);
        sorted
    }

    /// Catalog shipped with the assistant
    pub fn builtin() -> Self {
        Self {
            properties: vec![
                Property {
                    id: "terreno1".into(),
                    name: "Terreno Residencial Las Flores".into(),
                    price: 85_000,
                    price_text: "$85,000 USD".into(),
                    area: 500,
                    area_text: "500 m²".into(),
                    location: "Zona Norte, Ciudad".into(),
                    category: PropertyCategory::Residential,
                    status: Availability::Available,
                    features: strings(&[
                        "Agua potable",
                        "Electricidad",
                        "Drenaje",
                        "Pavimentación",
                        "Seguridad 24/7",
                        "Cerca de escuelas",
                        "Transporte público",
                        "Centros comerciales cercanos",
                    ]),
                    description: "Excelente terreno en zona residencial con todos los servicios disponibles.".into(),
                    coordinates: Coordinates::new(19.4326, -99.1332),
                    financing_options: strings(&["Crédito bancario", "Pago directo", "INFONAVIT"]),
                    legal_status: "Escrituras en regla".into(),
                },
                Property {
                    id: "terreno2".into(),
                    name: "Terreno Comercial Centro".into(),
                    price: 150_000,
                    price_text: "$150,000 USD".into(),
                    area: 800,
                    area_text: "800 m²".into(),
                    location: "Centro Comercial".into(),
                    category: PropertyCategory::Commercial,
                    status: Availability::Available,
                    features: strings(&[
                        "Ubicación estratégica",
                        "Alto tráfico peatonal",
                        "Transporte público",
                        "Zonificación comercial",
                        "Servicios completos",
                        "Estacionamiento cercano",
                    ]),
                    description: "Ideal para desarrollo comercial con alta afluencia de personas.".into(),
                    coordinates: Coordinates::new(19.4285, -99.1277),
                    financing_options: strings(&["Crédito comercial", "Pago directo"]),
                    legal_status: "Uso de suelo comercial".into(),
                },
                Property {
                    id: "terreno3".into(),
                    name: "Terreno Industrial El Progreso".into(),
                    price: 120_000,
                    price_text: "$120,000 USD".into(),
                    area: 1_200,
                    area_text: "1,200 m²".into(),
                    location: "Zona Industrial".into(),
                    category: PropertyCategory::Industrial,
                    status: Availability::Available,
                    features: strings(&[
                        "Acceso a carreteras principales",
                        "Servicios industriales",
                        "Zonificación industrial",
                        "Amplio espacio",
                        "Energía trifásica",
                        "Agua industrial",
                    ]),
                    description: "Perfecto para desarrollo industrial con acceso a carreteras principales.".into(),
                    coordinates: Coordinates::new(19.3910, -99.2837),
                    financing_options: strings(&["Crédito industrial", "Leasing"]),
                    legal_status: "Zonificación industrial aprobada".into(),
                },
                Property {
                    id: "terreno4".into(),
                    name: "Terreno Campestre Vista Hermosa".into(),
                    price: 65_000,
                    price_text: "$65,000 USD".into(),
                    area: 2_000,
                    area_text: "2,000 m²".into(),
                    location: "Zona Rural".into(),
                    category: PropertyCategory::RuralRecreational,
                    status: Availability::Available,
                    features: strings(&[
                        "Vista panorámica",
                        "Ambiente natural",
                        "Aire puro",
                        "Tranquilidad",
                        "Ideal para casa de campo",
                        "Acceso por camino rural",
                        "Pozo de agua",
                    ]),
                    description: "Hermoso terreno campestre con vista panorámica y ambiente natural.".into(),
                    coordinates: Coordinates::new(19.5126, -99.0532),
                    financing_options: strings(&["Pago directo", "Planes flexibles"]),
                    legal_status: "Escrituras en orden".into(),
                },
            ],
            company: CompanyInfo {
                name: "Terrenos Premium".into(),
                phone: "+1 234 567 8900".into(),
                email: "info@terrenospremium.com".into(),
                address: "Av. Principal 123, Centro, Ciudad".into(),
                hours: "Lunes - Viernes: 9:00 AM - 6:00 PM, Sábados: 9:00 AM - 2:00 PM".into(),
                whatsapp: "1234567890".into(),
                social_media: BTreeMap::from([
                    ("facebook".to_string(), "Terrenos Premium".to_string()),
                    ("instagram".to_string(), "@terrenospremium".to_string()),
                ]),
            },
            services: vec![
                service(
                    "Búsqueda Personalizada",
                    "Te ayudamos a encontrar el terreno perfecto según tus necesidades",
                ),
                service("Asesoría Legal", "Acompañamiento completo en trámites y documentación"),
                service("Financiamiento", "Opciones flexibles adaptadas a tu presupuesto"),
                service("Topografía", "Levantamientos topográficos profesionales"),
                service("Gestión de Permisos", "Tramitación de permisos de construcción"),
            ],
            financing: FinancingTerms {
                down_payment_min_percent: 20,
                interest_rates: BTreeMap::from([
                    (PropertyCategory::Residential, 8.5),
                    (PropertyCategory::Commercial, 9.5),
                    (PropertyCategory::Industrial, 10.0),
                ]),
                terms_months: vec![12, 24, 36, 48, 60],
                banks: strings(&["Banco Nacional", "Banco Comercial", "Banco Industrial"]),
            },
        }
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn service(name: &str, description: &str) -> ServiceOffering {
    ServiceOffering {
        name: name.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_unique() {
        let kb = KnowledgeBase::builtin();
        let ids: HashSet<&str> = kb.properties.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), kb.properties.len());
    }

    #[test]
    fn test_properties_by_price_ascending() {
        let kb = KnowledgeBase::builtin();
        let prices: Vec<u64> = kb.properties_by_price().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![65_000, 85_000, 120_000, 150_000]);
    }

    #[test]
    fn test_properties_in_category() {
        let kb = KnowledgeBase::builtin();
        let industrial: Vec<_> = kb.properties_in(PropertyCategory::Industrial).collect();
        assert_eq!(industrial.len(), 1);
        assert_eq!(industrial[0].id, "terreno3");
    }

    #[test]
    fn test_whatsapp_link() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.company.whatsapp_link(), "https://wa.me/1234567890");
    }

    #[test]
    fn test_yaml_roundtrip_keeps_rate_keys() {
        let kb = KnowledgeBase::builtin();
        let yaml = serde_yaml::to_string(&kb).unwrap();
        let parsed: KnowledgeBase = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.financing.interest_rates.len(), 3);
        assert_eq!(
            parsed.financing.interest_rates.get(&PropertyCategory::Commercial),
            Some(&9.5)
        );
    }
}
