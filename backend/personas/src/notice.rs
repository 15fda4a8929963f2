//! App overview and the advice disclaimer every front-end shows.

pub const OVERVIEW: &str =
    "このアプリでは、様々な分野の専門家として振る舞うAIに質問や相談ができます。";

/// Shown alongside every persona; answers are general advice only.
pub const DISCLAIMER: [&str; 2] = [
    "このアプリはAIによる一般的なアドバイスを提供します",
    "医療、法律、金融などの専門的な判断が必要な場合は、必ず専門家にご相談ください",
];

/// The "注意事項" block as bulleted lines.
pub fn disclaimer_text() -> String {
    let mut text = String::from("🔒 注意事項");
    for line in DISCLAIMER {
        text.push_str("\n- ");
        text.push_str(line);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disclaimer_block_lists_every_line() {
        let text = disclaimer_text();
        assert!(text.starts_with("🔒 注意事項\n"));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("- 医療、法律、金融などの専門的な判断が必要な場合は、必ず専門家にご相談ください"));
    }
}
