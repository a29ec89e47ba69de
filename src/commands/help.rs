pub fn execute() -> Result<String, String> {
    Ok([
        "📖 Dólar Dashboard Commands",
        "",
        "🃏 Cards",
        "  blue | cripto         Click a card: narrow the chart to it, click again for both",
        "  cards                 Show the quote cards",
        "",
        "📈 Chart",
        "  window <w>            Time window: all, 6m, 1m, 1w, 1d (or type the window alone)",
        "  table                 Show the chart data as a table",
        "  tooltip <fecha>       Show the values for one date",
        "  chart [path]          Export the chart as PNG",
        "",
        "⚙️ General",
        "  theme                 Toggle light/dark presentation",
        "  refresh               Fetch all quotes again",
        "  help                  Show this help message",
        "  quit                  Leave",
    ]
    .join("\n"))
}
