use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Equipment supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    pub id: i32,
    pub razon_social: String,
    /// Peruvian taxpayer id, unique per provider
    pub ruc: String,
    pub email: Option<String>,
    pub contacto_nombre: Option<String>,
    pub telefono: Option<String>,
    pub sitio_web: Option<String>,
    pub fecha_registro: DateTime<Utc>,
}

/// DTO for registering a provider
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProvider {
    #[validate(length(min = 1, max = 200, message = "razon_social is required"))]
    pub razon_social: String,

    #[validate(length(min = 1, max = 20, message = "ruc is required"))]
    pub ruc: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub contacto_nombre: Option<String>,

    #[serde(default)]
    pub telefono: Option<String>,

    #[serde(default)]
    pub sitio_web: Option<String>,
}

impl CreateProvider {
    /// Trims the identifying fields so " 2060..." and "2060..." collide on RUC.
    pub fn normalized(mut self) -> Self {
        self.razon_social = self.razon_social.trim().to_string();
        self.ruc = self.ruc.trim().to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ruc_fails_after_normalizing() {
        let input: CreateProvider = serde_json::from_value(serde_json::json!({
            "razon_social": "Tech Import SAC",
            "ruc": "   "
        }))
        .unwrap();

        let errors = input.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ruc"));
    }

    #[test]
    fn test_optional_contact_fields() {
        let input: CreateProvider = serde_json::from_value::<CreateProvider>(serde_json::json!({
            "razon_social": " Compu Perú EIRL ",
            "ruc": "20601234567"
        }))
        .unwrap()
        .normalized();

        assert_eq!(input.razon_social, "Compu Perú EIRL");
        assert!(input.email.is_none());
        assert!(input.validate().is_ok());
    }
}
