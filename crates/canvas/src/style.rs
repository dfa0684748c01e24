use crate::color::{interpolate, FALLBACK_COLOR};
use crate::palette::ColorPair;
use roadweave_common::{HandlePosition, NodeStyle};
use roadweave_graph_layout::RankDir;

/// Share of the start-to-end blend covered across the whole roadmap, so the
/// last layer still reads as the same hue
const GRADIENT_SPAN: f32 = 0.5;
const SHADE: f32 = 0.3;
/// Alpha suffix appended to the base colour for the glow
const GLOW_ALPHA: &str = "60";

/// Style of a node of the given branch colours, `rank_factor` being its
/// relative horizontal position in `[0, 1]`
pub fn node_style(colors: &ColorPair, rank_factor: f32) -> NodeStyle {
    let base = interpolate(&colors.start, &colors.end, rank_factor * GRADIENT_SPAN);
    let dark = interpolate(&base, "#000000", SHADE);
    let light = interpolate(&base, "#ffffff", SHADE);
    let glow = if base.starts_with('#') && base.len() == 7 {
        format!("{base}{GLOW_ALPHA}")
    } else {
        format!("{FALLBACK_COLOR}{GLOW_ALPHA}")
    };

    NodeStyle {
        background: format!("linear-gradient(135deg, {base} 0%, {dark} 100%)"),
        border: format!("1px solid {light}"),
        box_shadow: format!("0 4px 15px {glow}, 0 1px 3px rgba(0,0,0,0.3)"),
        border_color: light,
        glow_color: glow,
        base_color: base,
    }
}

/// Sides where incoming and outgoing edges attach, as `(target, source)`
pub fn handle_positions(rank_dir: RankDir) -> (HandlePosition, HandlePosition) {
    match rank_dir {
        RankDir::LeftRight => (HandlePosition::Left, HandlePosition::Right),
        RankDir::RightLeft => (HandlePosition::Right, HandlePosition::Left),
        RankDir::TopBottom => (HandlePosition::Top, HandlePosition::Bottom),
        RankDir::BottomTop => (HandlePosition::Bottom, HandlePosition::Top),
    }
}
