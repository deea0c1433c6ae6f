// File: crates/pricechart-core/tests/rgba.rs
// Purpose: Validate color parsing/formatting and theme lookup.

use pricechart_core::theme::{find, presets};
use pricechart_core::{Rgba, Theme};

#[test]
fn hex_forms_parse() {
    assert_eq!("#00c27a".parse::<Rgba>().unwrap(), Rgba::rgb(0x00, 0xc2, 0x7a));
    assert_eq!("fff".parse::<Rgba>().unwrap(), Rgba::rgb(255, 255, 255));
    assert_eq!("#11223380".parse::<Rgba>().unwrap(), Rgba::from_argb(0x80, 0x11, 0x22, 0x33));
    for bad in ["", "#12", "#12345", "#gggggg", "#ü1234"] {
        assert!(bad.parse::<Rgba>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn display_is_parseable_hex() {
    let c = Rgba::from_argb(71, 0, 0xc2, 0x7a);
    assert_eq!(c.to_string(), "#00c27a47");
    assert_eq!(c.to_string().parse::<Rgba>().unwrap(), c);
    assert_eq!(Rgba::rgb(1, 2, 3).to_string(), "#010203");
    assert_eq!(c.to_argb_u32(), 0x4700_c27a);
}

#[test]
fn theme_presets() {
    assert_eq!(presets().len(), 2);
    assert_eq!(find("DARK"), Theme::dark());
    assert_eq!(find("unknown"), Theme::light());
    assert_eq!(Theme::default().line_stroke, Rgba::rgb(0x00, 0xc2, 0x7a));
}
