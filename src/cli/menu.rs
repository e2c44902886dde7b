use crate::catalog;

pub fn run() {
    println!("{}", catalog::render_full_menu());
}
