//! Static facts about the restaurant: contact details, payment
//! details for transfers and the weekly opening schedule.

mod schedule;
pub use schedule::{DayHours, OpenStatus, WeeklySchedule, day_name, local_now};

#[derive(Clone, Debug)]
pub struct RestaurantInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub transfer_clabe: String,
    pub transfer_bank: String,
    pub transfer_name: String,
}

impl Default for RestaurantInfo {
    fn default() -> Self {
        Self {
            name: String::from("Sr y Sra Burger"),
            phone: String::from("922-159-36-88"),
            address: String::from("Coahuila #36, Colonia Emiliano Zapata"),
            transfer_clabe: String::from("722969010805762486"),
            transfer_bank: String::from("Mercado Pago W"),
            transfer_name: String::from("Joel Maciel Villalobos"),
        }
    }
}

impl RestaurantInfo {
    /// Full origin address used for distance lookups.
    pub fn origin(&self, region: &str) -> String {
        format!("{}, {}", self.address, region)
    }
}
