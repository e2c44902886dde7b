//! Keyword responder used whenever the language model is missing or
//! fails. It never touches conversation history.

use chrono::NaiveDateTime;

use crate::catalog;
use crate::restaurant::{RestaurantInfo, WeeklySchedule};

const GREETINGS: &[&str] = &[
    "hola",
    "buenas",
    "buen día",
    "buenas tardes",
    "buenas noches",
    "hey",
    "hi",
    "hello",
];
const MENU_WORDS: &[&str] = &["menú", "menu", "carta", "que tienen", "qué tienen", "platillos"];
const HOURS_WORDS: &[&str] = &["horario", "hora", "abren", "cierran", "abierto", "cerrado"];
const LOCATION_WORDS: &[&str] = &[
    "ubicación",
    "ubicacion",
    "dirección",
    "direccion",
    "donde",
    "dónde",
    "llegar",
];
const COMBO_WORDS: &[&str] = &["combo", "promo", "promoción", "promocion", "oferta"];
const MAX_SEARCH_HITS: usize = 5;

fn mentions(msg: &str, words: &[&str]) -> bool {
    words.iter().any(|w| msg.contains(w))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reply to `message` without a language model. The first matching
/// rule wins: greeting, menu, hours, location, combos, item search and
/// finally a help message.
pub fn fallback_reply(
    message: &str,
    now: NaiveDateTime,
    restaurant: &RestaurantInfo,
    schedule: &WeeklySchedule,
) -> String {
    let msg = message.trim().to_lowercase();

    if mentions(&msg, GREETINGS) {
        let status = schedule.status_at(now);
        return format!(
            "¡Hola! 👋 Bienvenido a *{}* 🍔\n\n\
             {}\n\n\
             ¿En qué puedo ayudarte?\n\
             • Escribe *menú* para ver nuestros platillos\n\
             • Escribe *horarios* para ver nuestros horarios\n\
             • Escribe *ubicación* para saber dónde estamos\n\
             • O dime directamente qué se te antoja 😋",
            restaurant.name, status.message
        );
    }

    if mentions(&msg, MENU_WORDS) {
        return catalog::render_full_menu();
    }

    if mentions(&msg, HOURS_WORDS) {
        let mut lines = vec![format!("⏰ *Horarios de {}:*\n", restaurant.name)];
        for (day, hours) in schedule.iter() {
            lines.push(format!("  • {}: {}", capitalize(day), hours));
        }
        lines.push(format!("\n📍 {}", schedule.status_at(now).message));
        return lines.join("\n");
    }

    if mentions(&msg, LOCATION_WORDS) {
        return format!(
            "📍 *{}*\nDirección: {}\n📞 {}\n\n¡Te esperamos! 🍔",
            restaurant.name, restaurant.address, restaurant.phone
        );
    }

    if mentions(&msg, COMBO_WORDS) {
        return catalog::render_category("combos")
            .unwrap_or_else(|| String::from("Pregunta por nuestros combos 📦"));
    }

    if !msg.is_empty() {
        let hits = catalog::search(&msg);
        if !hits.is_empty() {
            let mut lines = vec![String::from("Encontré esto para ti:\n")];
            for hit in hits.iter().take(MAX_SEARCH_HITS) {
                let price = hit
                    .price
                    .map(|p| format!("${}", p))
                    .unwrap_or_else(|| String::from("Consultar"));
                lines.push(format!("• *{}* — {}", hit.name, price));
                lines.push(format!("  {}", hit.description));
                lines.push(format!("  📂 {}", hit.category));
            }
            lines.push(String::from("\n¿Te gustaría ordenar algo? 😋"));
            return lines.join("\n");
        }
    }

    format!(
        "¡Gracias por escribirnos a *{}*! 🍔\n\n\
         No entendí tu mensaje, pero puedo ayudarte con:\n\
         • *menú* — ver nuestros platillos y precios\n\
         • *horarios* — cuándo estamos abiertos\n\
         • *ubicación* — cómo llegar\n\
         • *combos* — ver nuestras promociones\n\n\
         O cuéntame qué se te antoja y con gusto te ayudo 😊",
        restaurant.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tuesday_evening() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 20)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap()
    }

    fn reply(message: &str) -> String {
        fallback_reply(
            message,
            tuesday_evening(),
            &RestaurantInfo::default(),
            &WeeklySchedule::default(),
        )
    }

    #[test]
    fn it_greets_with_open_status() {
        let text = reply("Hola!");
        assert!(text.starts_with("¡Hola! 👋 Bienvenido a *Sr y Sra Burger*"));
        assert!(text.contains("Estamos abiertos hasta las 10:00 PM"));
    }

    #[test]
    fn it_greets_with_closed_status() {
        let greet_at = |day: u32, hour: u32| {
            let now = NaiveDate::from_ymd_opt(2026, 10, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap();
            fallback_reply(
                "hola",
                now,
                &RestaurantInfo::default(),
                &WeeklySchedule::default(),
            )
        };

        // Monday is the rest day
        let text = greet_at(19, 19);
        assert!(text.contains("Hoy lunes descansamos 🚫"));
        assert!(!text.contains("Estamos abiertos"));

        // Tuesday before opening
        let text = greet_at(20, 11);
        assert!(text.contains("Hoy martes nuestro horario es 6:00 PM - 10:00 PM"));
        assert!(!text.contains("Estamos abiertos"));
    }

    #[test]
    fn it_sends_the_menu() {
        assert_eq!(reply("me pasas el menú"), catalog::render_full_menu());
    }

    #[test]
    fn it_lists_the_schedule() {
        let text = reply("a qué horario abren?");
        assert!(text.contains("  • Lunes: Descansamos 🚫"));
        assert!(text.contains("  • Martes: 6:00 PM - 10:00 PM"));
        assert!(text.ends_with("📍 Estamos abiertos hasta las 10:00 PM"));
    }

    #[test]
    fn it_gives_the_location() {
        let text = reply("dónde están?");
        assert!(text.contains("Coahuila #36, Colonia Emiliano Zapata"));
        assert!(text.contains("922-159-36-88"));
    }

    #[test]
    fn it_lists_combos() {
        assert_eq!(reply("tienen promo?"), catalog::render_category("combos").unwrap());
    }

    #[test]
    fn it_searches_items_before_giving_up() {
        let text = reply("sencilla");
        assert!(text.starts_with("Encontré esto para ti:"));
        assert!(text.contains("• *Sencilla* — $90"));

        let text = reply("zzz");
        assert!(text.contains("No entendí tu mensaje"));
    }
}
