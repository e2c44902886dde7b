//! Hidden context fragments appended to a customer's message before it
//! reaches the model. Everything here starts with `CONTEXT_MARKER` so
//! it can be stripped from transcripts later.

use chrono::{Datelike, NaiveDateTime};

use crate::delivery::{DeliveryError, DeliveryQuote};
use crate::restaurant::{OpenStatus, day_name};

/// Words in the bot's previous message that mean it just asked for a
/// delivery address.
const ADDRESS_REQUEST_KEYWORDS: &[&str] = &[
    "colonia",
    "dirección",
    "direccion",
    "envío",
    "envio",
    "domicilio",
    "ubicación",
    "ubicacion",
];

/// Street, colony and avenue markers in the customer's own message.
const ADDRESS_KEYWORDS: &[&str] = &[
    "col ",
    "col.",
    "colonia",
    "fraccionamiento",
    "fracc",
    "calle ",
    "av ",
    "av.",
    "avenida",
    "boulevard",
    "blvd",
];

/// Whether `message` should be priced as a delivery destination.
pub fn looks_like_address(message: &str, last_assistant_text: Option<&str>) -> bool {
    let msg = message.trim().to_lowercase();
    if msg.chars().count() <= 3 {
        return false;
    }
    let asked_for_address = last_assistant_text
        .map(|text| {
            let text = text.to_lowercase();
            ADDRESS_REQUEST_KEYWORDS.iter().any(|k| text.contains(k))
        })
        .unwrap_or(false);

    asked_for_address || ADDRESS_KEYWORDS.iter().any(|k| msg.contains(k))
}

/// Fragment describing the outcome of a delivery quote. Failures other
/// than an out of range destination add nothing.
pub fn delivery_fragment(
    message: &str,
    result: &Result<DeliveryQuote, DeliveryError>,
) -> Option<String> {
    match result {
        Ok(quote) => Some(format!(
            "\n[SISTEMA - CÁLCULO DE ENVÍO AUTOMÁTICO]:\n\
             Destino: {}\n\
             Distancia: {} ({} km)\n\
             Tiempo estimado: {}\n\
             Costo de envío: ${:.0} MXN\n\
             Incluye esta información en tu respuesta de forma natural.\n",
            message, quote.distance_text, quote.distance_km, quote.duration_text, quote.fee
        )),
        Err(DeliveryError::OutOfRange {
            distance_text,
            max_km,
            ..
        }) => Some(format!(
            "\n[SISTEMA - FUERA DE ZONA]:\n\
             La dirección '{}' está a {}, fuera de la zona de entrega (máximo {:.0} km). \
             Informa al cliente amablemente que no llegamos ahí y sugiere recoger en tienda.\n",
            message, distance_text, max_km
        )),
        Err(_) => None,
    }
}

/// Fragment telling the model the restaurant is closed right now.
/// `None` while open.
pub fn closed_fragment(now: NaiveDateTime, status: &OpenStatus) -> Option<String> {
    if status.is_open {
        return None;
    }
    Some(format!(
        "\n[SISTEMA - VERIFICACIÓN DE HORARIO]: Son las {} del {}. \
         El restaurante está CERRADO. {}. \
         NO confirmes servicio ni tomes pedidos. Informa que estamos cerrados.",
        now.format("%I:%M %p"),
        day_name(now.weekday()),
        status.message
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::chat::strip_context;
    use chrono::NaiveDate;

    #[test]
    fn it_detects_address_after_bot_asks_for_one() {
        let asked = Some("¿Me pasas tu colonia o dirección para calcular el envío? 📍");
        assert!(looks_like_address("Rancho Alegre", asked));
        assert!(!looks_like_address("Rancho Alegre", Some("¿Algo más?")));
        assert!(!looks_like_address("sí", asked));
    }

    #[test]
    fn it_detects_address_markers_in_message() {
        assert!(looks_like_address("Col. Petrolera", None));
        assert!(looks_like_address("calle Hidalgo 12", None));
        assert!(looks_like_address("Av Juárez", None));
        assert!(!looks_like_address("quiero una hamburguesa", None));
    }

    #[test]
    fn it_builds_delivery_fragment_on_success() {
        let quote = DeliveryQuote {
            distance_km: 3.2,
            distance_text: "3.2 km".into(),
            duration_text: "8 mins".into(),
            fee: 30.0,
        };
        let fragment = delivery_fragment("Col. Petrolera", &Ok(quote)).unwrap();
        assert!(fragment.contains("[SISTEMA - CÁLCULO DE ENVÍO AUTOMÁTICO]"));
        assert!(fragment.contains("Distancia: 3.2 km (3.2 km)"));
        assert!(fragment.contains("Costo de envío: $30 MXN"));

        let message = format!("Col. Petrolera{}", fragment);
        assert_eq!(strip_context(&message), "Col. Petrolera");
    }

    #[test]
    fn it_builds_out_of_range_fragment() {
        let err = DeliveryError::OutOfRange {
            distance_km: 40.0,
            distance_text: "40 km".into(),
            max_km: 15.0,
        };
        let fragment = delivery_fragment("Coatzacoalcos", &Err(err)).unwrap();
        assert!(fragment.contains("[SISTEMA - FUERA DE ZONA]"));
        assert!(fragment.contains("máximo 15 km"));
        assert!(fragment.contains("recoger en tienda"));
    }

    #[test]
    fn it_stays_silent_on_other_failures() {
        assert!(delivery_fragment("x", &Err(DeliveryError::Unresolvable)).is_none());
        assert!(delivery_fragment("x", &Err(DeliveryError::Unavailable)).is_none());
    }

    #[test]
    fn it_only_builds_closed_fragment_when_closed() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(19, 5, 0)
            .unwrap();
        let closed = OpenStatus {
            is_open: false,
            message: "Hoy lunes descansamos 🚫".into(),
        };
        let fragment = closed_fragment(now, &closed).unwrap();
        assert!(fragment.contains("Son las 07:05 PM del lunes"));
        assert!(fragment.contains("CERRADO. Hoy lunes descansamos 🚫."));

        let open = OpenStatus {
            is_open: true,
            message: "Estamos abiertos hasta las 10:00 PM".into(),
        };
        assert!(closed_fragment(now, &open).is_none());
    }
}
