//! Reading tests: packages laid out the way spreadsheet applications write them.

mod border_styles;
mod data_types;
mod dimensions;
mod fill_styles;
mod font_styles;
mod number_formats;
