use serde::Serialize;
use shared_types::{BrandConfig, FontFamily};

/// Opacity of the dark layer drawn over a hero background image.
pub const HERO_SCRIM_OPACITY: f32 = 0.6;
pub const HERO_IMAGE_TITLE_COLOR: &str = "#ffffff";
pub const HERO_IMAGE_SUBTITLE_COLOR: &str = "#e2e8f0";
/// Hex alpha appended to the secondary color for the gradient tint.
const GRADIENT_TINT_ALPHA: &str = "15";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HeroBackground {
    #[serde(rename_all = "camelCase")]
    Image { url: String, scrim_opacity: f32 },
    #[serde(rename_all = "camelCase")]
    Gradient { tint: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroTheme {
    pub background: HeroBackground,
    pub title_color: String,
    /// `None` keeps the page's default text color
    pub subtitle_color: Option<String>,
    pub button_color: String,
}

/// Light text over a scrimmed image, or brand-colored text over a tinted gradient.
pub fn hero_theme(background_image_url: Option<&str>, brand: &BrandConfig) -> HeroTheme {
    match background_image_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => HeroTheme {
            background: HeroBackground::Image {
                url: url.to_string(),
                scrim_opacity: HERO_SCRIM_OPACITY,
            },
            title_color: HERO_IMAGE_TITLE_COLOR.to_string(),
            subtitle_color: Some(HERO_IMAGE_SUBTITLE_COLOR.to_string()),
            button_color: brand.secondary_color.clone(),
        },
        None => HeroTheme {
            background: HeroBackground::Gradient {
                tint: with_alpha(&brand.secondary_color, GRADIENT_TINT_ALPHA),
            },
            title_color: brand.primary_color.clone(),
            subtitle_color: None,
            button_color: brand.secondary_color.clone(),
        },
    }
}

/// `#RRGGBB` plus a two-digit alpha. `#RGB` is widened first so the result
/// stays an 8-digit color.
fn with_alpha(color: &str, alpha: &str) -> String {
    match color.strip_prefix('#') {
        Some(hex) if hex.len() == 3 => {
            let wide: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("#{wide}{alpha}")
        }
        _ => format!("{color}{alpha}"),
    }
}

pub fn font_stack(font: FontFamily) -> &'static str {
    match font {
        FontFamily::Inter => "'Inter', system-ui, sans-serif",
        FontFamily::Roboto => "'Roboto', system-ui, sans-serif",
        FontFamily::OpenSans => "'Open Sans', system-ui, sans-serif",
        FontFamily::Lato => "'Lato', system-ui, sans-serif",
        FontFamily::Montserrat => "'Montserrat', system-ui, sans-serif",
    }
}
