use egui::Color32;

pub const CONTENT_WIDTH: f32 = 700.0;

#[derive(Debug, Clone, Copy)]
pub struct Accent {
    pub fill: Color32,
    pub hover: Color32,
}

pub const SEARCH_ACCENT: Accent = Accent {
    fill: Color32::from_rgb(0x00, 0x70, 0xf3),
    hover: Color32::from_rgb(0x00, 0x5b, 0xb5),
};

pub const REBUILD_ACCENT: Accent = Accent {
    fill: Color32::from_rgb(0xe6, 0x39, 0x46),
    hover: Color32::from_rgb(0xb7, 0x1c, 0x1c),
};

pub const CARD_FILL: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfa);
pub const CARD_STROKE: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);
pub const TITLE_TEXT: Color32 = Color32::BLACK;
pub const DESCRIPTION_TEXT: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub const FOOTER_TEXT: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xb7, 0x1c, 0x1c);
pub const STATUS_TEXT: Color32 = Color32::from_rgb(0x1b, 0x5e, 0x20);
