pub mod color_picker;
pub mod legend;
pub mod month_grid;
pub mod plants_bar;
