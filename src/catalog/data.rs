use super::{Category, MenuItem};

const fn item(name: &'static str, price: u32, description: &'static str) -> MenuItem {
    MenuItem {
        name,
        price: Some(price),
        description,
    }
}

pub static MENU: &[Category] = &[
    Category {
        key: "hamburguesas",
        title: "🍔 HAMBURGUESAS",
        note: "Extra: Agrega papas a tu hamburguesa por solo $25",
        items: &[
            item("Sencilla", 90, "Hamburguesa clásica sencilla"),
            item("Premium", 105, "Hamburguesa premium con ingredientes selectos"),
            item("BBQ Bacon", 115, "Con tocino crujiente y salsa BBQ"),
            item("Alohawai", 120, "Con piña y toque hawaiano"),
            item("Cheesstorra", 125, "Con chistorra y queso derretido"),
            item("Salchiburger", 125, "Con salchicha especial"),
            item("Choriargentina", 125, "Con chorizo argentino"),
            item("Guacamole Burger", 140, "Con guacamole fresco"),
            item("Boneles Burger", 150, "Con boneless crujientes"),
        ],
    },
    Category {
        key: "hotdogs",
        title: "🌭 HOTDOGS",
        note: "Extra: Agrega papas a tu hotdog por solo $25 (gajo o francesas)",
        items: &[item("Hot Dog Jumbo", 65, "Hot dog tamaño jumbo")],
    },
    Category {
        key: "boneless",
        title: "🍗 BONELESS",
        note: "Incluyen papas gajo o francesas. Salsas: BBQ Dulce, BBQ Picante, Parmesano Ranch",
        items: &[
            item("Boneless 250g", 130, "250 gramos de boneless con papas"),
            item("Boneless 500g", 250, "500 gramos de boneless con papas"),
            item("Boneless 1kg", 480, "1 kilogramo de boneless con papas"),
        ],
    },
    Category {
        key: "complementos",
        title: "🍟 COMPLEMENTOS",
        note: "Disponibles en tamaño M y XL",
        items: &[
            item("Papas Francesas M", 65, "Papas francesas tamaño mediano"),
            item("Papas Francesas XL", 130, "Papas francesas tamaño extra grande"),
            item("Papas Gajo M", 65, "Papas gajo tamaño mediano"),
            item("Papas Gajo XL", 130, "Papas gajo tamaño extra grande"),
            item("Salchipapas M", 90, "Papas con salchicha tamaño mediano"),
            item("Salchipapas XL", 150, "Papas con salchicha tamaño extra grande"),
            item("Parmesanas M", 100, "Papas parmesanas tamaño mediano"),
            item("Parmesanas XL", 140, "Papas parmesanas tamaño extra grande"),
            item("Aros de Cebolla M", 50, "Aros de cebolla tamaño mediano"),
            item("Aros de Cebolla XL", 95, "Aros de cebolla tamaño extra grande"),
        ],
    },
    Category {
        key: "postres",
        title: "🍰 POSTRES",
        note: "",
        items: &[
            item("Cheesecake Fresa", 80, "Cheesecake de fresa"),
            item("Cheesecake Avellana/Queso Bola", 85, "Cheesecake de avellana o queso bola"),
            item("Cheesecake Kinder Delice", 90, "Cheesecake Kinder Delice"),
            item("Cheesecake Lotus", 90, "Cheesecake Lotus"),
        ],
    },
    Category {
        key: "bebidas",
        title: "🥤 BEBIDAS",
        note: "",
        items: &[
            item("Coca-Cola 600ml", 25, "Coca-Cola personal"),
            item("Coca-Cola 1.75L", 50, "Coca-Cola familiar mediana"),
            item("Coca-Cola 3L", 65, "Coca-Cola familiar grande"),
        ],
    },
    Category {
        key: "combos",
        title: "📦 COMBOS",
        note: "En todos los combos se puede cambiar el tipo de hamburguesa o tamaño de complemento pagando la diferencia",
        items: &[
            item(
                "Combo Amigos",
                380,
                "3 Hamburguesas Premium + Aros de cebolla M + Papas a elección M",
            ),
            item("Combo Triple Dog", 215, "3 Hotdogs Jumbo + Papas a elección M"),
            item(
                "Combo Familiar",
                680,
                "5 Hamburguesas Premium + Papas XL + Aros de cebolla XL + Coca-Cola 3L",
            ),
            item(
                "Combo Boneles",
                215,
                "1 Hamburguesa Premium + 250g de Boneless + Papas M",
            ),
            item("Combo Duo", 190, "1 Hamburguesa Premium + 1 Hotdog Jumbo + Papas M"),
        ],
    },
];
