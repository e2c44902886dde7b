//! The menu. Edit `data.rs` to change dishes, prices or notes; the
//! rest of the crate only reads it through the functions below.

mod data;

use serde::Serialize;

pub use data::MENU;

const RULE_WIDTH: usize = 28;

#[derive(Debug)]
pub struct MenuItem {
    pub name: &'static str,
    pub price: Option<u32>,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct Category {
    pub key: &'static str,
    pub title: &'static str,
    pub note: &'static str,
    pub items: &'static [MenuItem],
}

/// An item found by [`search`] along with the title of its category.
#[derive(Debug, Serialize, PartialEq)]
pub struct SearchHit {
    pub name: String,
    pub price: Option<u32>,
    pub description: String,
    pub category: String,
}

fn price_label(price: Option<u32>, missing: &str) -> String {
    match price {
        Some(p) => format!("${}", p),
        None => missing.to_string(),
    }
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// The whole menu formatted for a chat message.
pub fn render_full_menu() -> String {
    let mut lines = vec![String::from("✨ *MENÚ Sr y Sra Burger* ✨\n")];
    for category in MENU {
        lines.push(format!("\n{}", category.title));
        lines.push(rule());
        for item in category.items {
            lines.push(format!(
                "  • {} — {}",
                item.name,
                price_label(item.price, "Consultar")
            ));
        }
        if !category.note.is_empty() {
            lines.push(format!("  📌 {}", category.note));
        }
    }
    lines.push(String::from("\n💬 ¿Qué se te antoja hoy?"));
    lines.join("\n")
}

/// Compact listing with descriptions used inside the system
/// instruction so the model can quote exact prices.
pub fn render_for_prompt() -> String {
    let mut lines = Vec::new();
    for category in MENU {
        lines.push(format!("\n{}:", category.title));
        for item in category.items {
            lines.push(format!(
                "- {}: {} ({})",
                item.name,
                price_label(item.price, "Precio por confirmar"),
                item.description
            ));
        }
        if !category.note.is_empty() {
            lines.push(format!("  Nota: {}", category.note));
        }
    }
    lines.join("\n")
}

pub fn render_category(key: &str) -> Option<String> {
    let category = MENU.iter().find(|c| c.key == key)?;
    let mut lines = vec![category.title.to_string(), rule()];
    for item in category.items {
        lines.push(format!(
            "  • {} — {}",
            item.name,
            price_label(item.price, "Consultar")
        ));
        if !item.description.is_empty() {
            lines.push(format!("    {}", item.description));
        }
    }
    if !category.note.is_empty() {
        lines.push(format!("\n📌 {}", category.note));
    }
    Some(lines.join("\n"))
}

/// Case-insensitive partial match of `query` against item names and
/// descriptions, in menu order.
pub fn search(query: &str) -> Vec<SearchHit> {
    let query = query.to_lowercase();
    MENU.iter()
        .flat_map(|category| {
            category.items.iter().map(move |item| (category, item))
        })
        .filter(|(_, item)| {
            item.name.to_lowercase().contains(&query)
                || item.description.to_lowercase().contains(&query)
        })
        .map(|(category, item)| SearchHit {
            name: item.name.to_string(),
            price: item.price,
            description: item.description.to_string(),
            category: category.title.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_renders_every_category_in_full_menu() {
        let menu = render_full_menu();
        for category in MENU {
            assert!(menu.contains(category.title));
        }
        assert!(menu.contains("  • Sencilla — $90"));
        assert!(menu.contains("📌 Disponibles en tamaño M y XL"));
    }

    #[test]
    fn it_renders_prompt_listing_with_descriptions() {
        let text = render_for_prompt();
        assert!(text.contains("- Hot Dog Jumbo: $65 (Hot dog tamaño jumbo)"));
        assert!(text.contains("  Nota: Extra: Agrega papas a tu hamburguesa por solo $25"));
    }

    #[test]
    fn it_renders_a_known_category() {
        let combos = render_category("combos").unwrap();
        assert!(combos.starts_with("📦 COMBOS"));
        assert!(combos.contains("  • Combo Duo — $190"));
        assert!(combos.contains("    1 Hamburguesa Premium + 1 Hotdog Jumbo + Papas M"));
    }

    #[test]
    fn it_returns_none_for_unknown_category() {
        assert!(render_category("ensaladas").is_none());
    }

    #[test]
    fn it_searches_names_and_descriptions() {
        let hits = search("BONELESS");
        assert!(hits.iter().any(|h| h.name == "Boneless 250g"));
        // "Combo Boneles" only matches through its description
        assert!(hits.iter().any(|h| h.name == "Combo Boneles"));
        let first = &hits[0];
        assert_eq!(first.category, "🍔 HAMBURGUESAS");
    }

    #[test]
    fn it_returns_nothing_for_unrelated_query() {
        assert!(search("pizza hawaiana con anchoas").is_empty());
    }
}
