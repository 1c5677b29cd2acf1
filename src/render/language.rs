/// Swatch used for languages missing from the table.
pub const NEUTRAL_COLOR: &str = "#8b949e";

/// Swatch colour for a language, following the host site's palette.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "Rust" => "#dea584",
        "Go" => "#00ADD8",
        "Python" => "#3572A5",
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "Java" => "#b07219",
        "Kotlin" => "#A97BFF",
        "Swift" => "#F05138",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "C#" => "#178600",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "Shell" => "#89e051",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Scala" => "#c22d40",
        "Haskell" => "#5e5086",
        "Elixir" => "#6e4a7e",
        "Lua" => "#000080",
        "Dart" => "#00B4AB",
        "Zig" => "#ec915c",
        "Vue" => "#41b883",
        "Nix" => "#7e7eff",
        _ => NEUTRAL_COLOR,
    }
}
