use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

use crate::models::{DollarSelection, DolarQuote};

const ARGENTINA_UTC_OFFSET_SECS: i32 = 3 * 3600;
const MESES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

fn argentina_time(ts: &DateTime<Utc>) -> DateTime<FixedOffset> {
    match FixedOffset::west_opt(ARGENTINA_UTC_OFFSET_SECS) {
        Some(offset) => ts.with_timezone(&offset),
        None => ts.fixed_offset(),
    }
}

/// es-AR short form, e.g. `27 ago, 17:58`
pub fn format_fecha_actualizacion(ts: &DateTime<Utc>) -> String {
    let local = argentina_time(ts);
    format!(
        "{:02} {}, {:02}:{:02}",
        local.day(),
        MESES[local.month0() as usize],
        local.hour(),
        local.minute()
    )
}

/// `▲ 1.52% spread` / `▼ 0.00% spread`. The arrow is decided on the
/// two-decimal value so that a spread displayed as 0.00 points down.
pub fn format_spread(quote: &DolarQuote) -> String {
    match quote.spread() {
        Some(spread) => {
            let rounded = (spread * 100.0).round() / 100.0;
            let arrow = if rounded > 0.0 { "▲" } else { "▼" };
            format!("{} {:.2}% spread", arrow, spread)
        }
        None => "▼ n/a spread".to_string(),
    }
}

/// Frame lines in a box. Selected cards get a double border.
fn boxed(lines: &[String], selected: bool) -> String {
    let (tl, tr, bl, br, h, v) = if selected {
        ('╔', '╗', '╚', '╝', '═', '║')
    } else {
        ('┌', '┐', '└', '┘', '─', '│')
    };

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let horizontal: String = std::iter::repeat(h).take(width + 2).collect();

    let mut out = format!("{}{}{}\n", tl, horizontal, tr);
    for line in lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("{} {}{} {}\n", v, line, " ".repeat(pad), v));
    }
    out.push_str(&format!("{}{}{}", bl, horizontal, br));
    out
}

/// Place `left` and `right` on one line at least `width` chars wide
fn spaced(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(2);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

pub fn render_card(quote: &DolarQuote, selected: bool) -> String {
    const WIDTH: usize = 36;

    let title = format!("Dólar {}", quote.nombre);
    let badge = quote.casa.to_uppercase();
    let compra = format!("${:.2}", quote.compra);
    let venta = format!("${:.2}", quote.venta);
    let updated = format!("⟳ {}", format_fecha_actualizacion(&quote.fecha_actualizacion));

    let lines = vec![
        spaced(&title, &badge, WIDTH),
        String::new(),
        format!("{:<18}{}", "Compra", "Venta"),
        format!("{:<18}{}", compra, venta),
        String::new(),
        spaced(&updated, &format_spread(quote), WIDTH),
    ];

    boxed(&lines, selected)
}

/// Both cards, blue first. Nothing is rendered until both quotes are present.
pub fn render_cards(
    blue: Option<&DolarQuote>,
    cripto: Option<&DolarQuote>,
    selection: DollarSelection,
) -> Option<String> {
    let (blue, cripto) = (blue?, cripto?);

    let cards: Vec<String> = [blue, cripto]
        .iter()
        .map(|quote| render_card(quote, selection.shows_casa(&quote.casa)))
        .collect();

    Some(cards.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::quote;
    use chrono::TimeZone;

    #[test]
    fn test_format_fecha_actualizacion_uses_argentina_time() {
        let ts = Utc.with_ymd_and_hms(2024, 8, 27, 20, 58, 0).unwrap();
        assert_eq!(format_fecha_actualizacion(&ts), "27 ago, 17:58");

        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 2, 5, 0).unwrap();
        assert_eq!(format_fecha_actualizacion(&ts), "31 dic, 23:05");
    }

    #[test]
    fn test_format_spread() {
        assert_eq!(format_spread(&quote("blue", 1320.0, 1340.0)), "▲ 1.52% spread");
        assert_eq!(format_spread(&quote("blue", 1000.0, 990.0)), "▼ -1.00% spread");
        assert_eq!(format_spread(&quote("blue", 100000.0, 100001.0)), "▼ 0.00% spread");
        assert_eq!(format_spread(&quote("blue", 0.0, 10.0)), "▼ n/a spread");
    }

    #[test]
    fn test_render_card_contents() {
        let card = render_card(&quote("blue", 1320.0, 1340.0), false);
        assert!(card.contains("Dólar Blue"));
        assert!(card.contains("BLUE"));
        assert!(card.contains("$1320.00"));
        assert!(card.contains("$1340.00"));
        assert!(card.contains("27 ago, 17:58"));
        assert!(card.starts_with('┌'));
    }

    #[test]
    fn test_selected_card_has_double_border() {
        let card = render_card(&quote("cripto", 1305.58, 1309.0), true);
        assert!(card.starts_with('╔'));
        assert!(card.contains("$1305.58"));
    }

    #[test]
    fn test_cards_need_both_quotes() {
        let blue = quote("blue", 1.0, 2.0);
        assert!(render_cards(Some(&blue), None, DollarSelection::Both).is_none());
        assert!(render_cards(None, Some(&blue), DollarSelection::Both).is_none());
    }

    #[test]
    fn test_cards_mark_selection() {
        let blue = quote("blue", 1.0, 2.0);
        let cripto = quote("cripto", 1.0, 2.0);

        let both = render_cards(Some(&blue), Some(&cripto), DollarSelection::Both).unwrap();
        assert_eq!(both.matches('╔').count(), 2);

        let only_cripto = render_cards(Some(&blue), Some(&cripto), DollarSelection::Cripto).unwrap();
        assert_eq!(only_cripto.matches('╔').count(), 1);
        assert!(only_cripto.find("Dólar Blue").unwrap() < only_cripto.find("Dólar Cripto").unwrap());
    }
}
