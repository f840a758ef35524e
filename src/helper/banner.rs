use crate::tasks::report::SEPARATOR_WIDTH;

const ART: [&str; 5] = [
    r" ___ ___  _____   _____ ___ ___ ___  _  _ ___ ___ ",
    r"| _ \ _ \/ _ \ \ / /_ _/ __|_ _/ _ \| \| | __| _ \",
    r"|  _/   / (_) \ V / | |\__ \| | (_) | .` | _||   /",
    r"|_| |_|_\\___/ \_/ |___|___/___\___/|_|\_|___|_|_\",
    r"",
];

/// Startup banner, every line padded to the report width.
pub fn render() -> String {
    let border = format!("+{}+", "=".repeat(SEPARATOR_WIDTH - 2));
    let version = format!("v{}", env!("CARGO_PKG_VERSION"));
    let art_width = ART.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for line in ART {
        out.push_str(&framed(line, art_width));
    }
    out.push_str(&framed(&version, version.chars().count()));
    out.push_str(&border);
    out.push('\n');
    out
}

/// Centers a block of `block_width` columns and left-aligns `text` inside it.
fn framed(text: &str, block_width: usize) -> String {
    let inner = SEPARATOR_WIDTH - 2;
    let block_width = block_width.min(inner);
    let text: String = text.chars().take(block_width).collect();
    let left = (inner - block_width) / 2;
    let right = inner - left - text.chars().count();
    format!("|{}{}{}|\n", " ".repeat(left), text, " ".repeat(right))
}
