use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Service categories a customer can book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    /// Full inspection, cleaning and tune-up
    FullService,
    /// Wheel truing and alignment
    WheelAlignment,
    /// Brake and gear adjustment or replacement
    BrakesAndGears,
    /// Fork and shock maintenance
    Suspension,
    /// Lights, racks and other accessories
    AccessoryInstall,
    /// Custom work on the bike
    Custom,
    /// After-sales follow-up
    AfterSales,
}

impl ServiceCategory {
    /// Catalog order, which is also the order the form offers them in
    pub const ALL: [ServiceCategory; 7] = [
        ServiceCategory::FullService,
        ServiceCategory::WheelAlignment,
        ServiceCategory::BrakesAndGears,
        ServiceCategory::Suspension,
        ServiceCategory::AccessoryInstall,
        ServiceCategory::Custom,
        ServiceCategory::AfterSales,
    ];

    /// Label shown to customers and sent by the widget
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::FullService => "Service Completo",
            ServiceCategory::WheelAlignment => "Alineación de ruedas",
            ServiceCategory::BrakesAndGears => "Frenos y cambio",
            ServiceCategory::Suspension => "Suspensión",
            ServiceCategory::AccessoryInstall => "Instalación de accesorios",
            ServiceCategory::Custom => "Personalizado",
            ServiceCategory::AfterSales => "Posventa",
        }
    }

    /// Landing page blurb. After-sales is not advertised there.
    pub fn description(&self) -> Option<&'static str> {
        match self {
            ServiceCategory::FullService => Some("Inspección, limpieza y ajuste general"),
            ServiceCategory::WheelAlignment => Some("Trueque y ajuste para ruedas perfectas"),
            ServiceCategory::BrakesAndGears => Some("Ajuste y reemplazo de pastillas/cables"),
            ServiceCategory::Suspension => Some("Mantenimiento y servicio de amortiguadores"),
            ServiceCategory::AccessoryInstall => Some("Accesorios, luces, portapaquetes"),
            ServiceCategory::Custom => Some("Modificaciones a medida para tu bici"),
            ServiceCategory::AfterSales => None,
        }
    }

    /// Backend problem type and subtype codes
    pub fn codes(&self) -> (u32, u32) {
        match self {
            ServiceCategory::FullService => (39, 131),
            ServiceCategory::WheelAlignment => (39, 99),
            ServiceCategory::BrakesAndGears => (39, 104),
            ServiceCategory::Suspension => (41, 94),
            ServiceCategory::AccessoryInstall => (39, 132),
            ServiceCategory::Custom => (41, 95),
            ServiceCategory::AfterSales => (39, 131),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

/// A problem code as the backend receives it: numeric for catalog services,
/// the raw label (or nothing) for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProblemCode {
    Code(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemCodes {
    pub category: ProblemCode,
    pub subcategory: ProblemCode,
}

/// What the customer picked in the service field. Labels outside the catalog
/// are kept verbatim and forwarded as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceSelection {
    Catalog(ServiceCategory),
    Other(String),
}

impl ServiceSelection {
    pub fn from_label(label: &str) -> Self {
        match ServiceCategory::from_label(label) {
            Some(category) => ServiceSelection::Catalog(category),
            None => ServiceSelection::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ServiceSelection::Catalog(category) => category.label(),
            ServiceSelection::Other(label) => label,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label().is_empty()
    }

    pub fn codes(&self) -> ProblemCodes {
        match self {
            ServiceSelection::Catalog(category) => {
                let (category, subcategory) = category.codes();
                ProblemCodes {
                    category: ProblemCode::Code(category),
                    subcategory: ProblemCode::Code(subcategory),
                }
            }
            ServiceSelection::Other(label) => ProblemCodes {
                category: ProblemCode::Text(label.clone()),
                subcategory: ProblemCode::Text(String::new()),
            },
        }
    }
}

impl Default for ServiceSelection {
    fn default() -> Self {
        ServiceSelection::Catalog(ServiceCategory::ALL[0])
    }
}

impl Serialize for ServiceSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ServiceSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(|label| ServiceSelection::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn suspension_maps_to_41_94() {
        let codes = ServiceSelection::from_label("Suspensión").codes();
        assert_eq!(codes.category, ProblemCode::Code(41));
        assert_eq!(codes.subcategory, ProblemCode::Code(94));
    }

    #[test]
    fn every_catalog_label_round_trips() {
        for category in ServiceCategory::ALL {
            assert_eq!(ServiceCategory::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn unknown_label_passes_through() {
        let selection = ServiceSelection::from_label("Pintura");
        assert_eq!(selection, ServiceSelection::Other("Pintura".into()));

        let codes = selection.codes();
        assert_eq!(serde_json::to_value(&codes.category).unwrap(), json!("Pintura"));
        assert_eq!(serde_json::to_value(&codes.subcategory).unwrap(), json!(""));
    }

    #[test]
    fn labels_are_matched_exactly() {
        assert_eq!(
            ServiceSelection::from_label("suspensión"),
            ServiceSelection::Other("suspensión".into())
        );
    }

    #[test]
    fn defaults_to_full_service() {
        let selection = ServiceSelection::default();
        assert_eq!(selection.label(), "Service Completo");
        assert_eq!(selection.codes().subcategory, ProblemCode::Code(131));
    }
}
