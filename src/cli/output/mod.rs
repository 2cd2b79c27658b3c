//! Terminal rendering shared by the commands.

use ansi_term::{Colour, Style};

use crate::{
    storage::entities::Course,
    toast::{Toast, ToastVariant},
    utils::percentage::Percentage,
};

const BAR_WIDTH: usize = 20;

pub fn print_toast(toast: &Toast) {
    println!("{}", render_toast(toast));
}

fn render_toast(toast: &Toast) -> String {
    let title = match toast.variant {
        ToastVariant::Default => Colour::Green.bold().paint(toast.title.as_str()),
        ToastVariant::Destructive => Colour::Red.bold().paint(toast.title.as_str()),
    };
    format!("{title}: {}", toast.description)
}

pub fn heading(text: &str) -> String {
    Style::new().bold().underline().paint(text).to_string()
}

/// `#rrggbb` to a colour. `None` for anything else.
fn hex_colour(color: &str) -> Option<Colour> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Colour::RGB(channel(0)?, channel(2)?, channel(4)?))
}

pub fn course_line(course: &Course) -> String {
    let swatch = match hex_colour(&course.color) {
        Some(colour) => colour.paint("■").to_string(),
        None => "■".to_string(),
    };
    format!("{swatch} {}\t{}", course.name, short_id(&course.id))
}

pub fn progress_line(label: &str, value: &str, progress: Percentage) -> String {
    format!("{label}\t{value}\t{}", progress.bar(BAR_WIDTH))
}

/// Ids are uuids, the first block is enough to tell them apart in a listing.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use ansi_term::Colour;

    use super::{hex_colour, render_toast, short_id};
    use crate::toast::Toast;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(hex_colour("#D4AF37"), Some(Colour::RGB(0xD4, 0xAF, 0x37)));
        assert_eq!(hex_colour("D4AF37"), None);
        assert_eq!(hex_colour("#D4AF3"), None);
        assert_eq!(hex_colour("#GGGGGG"), None);
    }

    #[test]
    fn toast_keeps_description() {
        let rendered = render_toast(&Toast::destructive("Error", "An error occurred"));
        assert!(rendered.ends_with(": An error occurred"));
        assert!(rendered.contains("Error"));
    }

    #[test]
    fn short_ids() {
        assert_eq!(short_id("1b4e28ba-2fa1-11d2-883f-0016d3cca427"), "1b4e28ba");
        assert_eq!(short_id("plain"), "plain");
    }
}
