//! Interactive consultation loop.
//!
//! Pick a persona, ask questions, review the last answer, and rate it.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use expertdesk_core::{ConsultationRequest, FeedbackRating};
use expertdesk_dispatcher::Dispatcher;
use expertdesk_personas::{disclaimer_text, Persona, OVERVIEW};

use crate::session::Session;

const HELP: &str = "\
コマンド:
  /persona <名前|slug|番号>  専門家を切り替える
  /personas                 専門家の一覧
  /last                     直前の質問と回答
  /feedback <1-4>           直前の回答を評価する
  /help                     このヘルプ
  /quit                     終了";

fn write_banner(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "📋 アプリ概要\n{OVERVIEW}\n")?;
    writeln!(out, "{}\n", disclaimer_text())
}

fn write_persona_menu(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "相談したい専門家を選択してください:")?;
    for (i, persona) in Persona::ALL.iter().enumerate() {
        let d = persona.descriptor();
        writeln!(out, "  {}. {} {} ({})", i + 1, d.icon, d.id, d.slug)?;
    }
    Ok(())
}

/// Parse a menu number, canonical id, or slug.
fn parse_persona(input: &str) -> Option<Persona> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Persona::ALL.get(i).copied());
    }
    input.parse().ok()
}

fn write_selected(out: &mut impl Write, persona: Persona) -> std::io::Result<()> {
    let d = persona.descriptor();
    writeln!(out, "選択中: {} {}", d.icon, d.short_description)?;
    writeln!(out, "{}", persona.input_placeholder())
}

fn write_feedback_menu(out: &mut impl Write) -> std::io::Result<()> {
    let options: Vec<String> = FeedbackRating::ALL
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}={}", i + 1, r.label()))
        .collect();
    writeln!(out, "この回答は役に立ちましたか？ /feedback <{}>", options.join(" "))
}

/// Run the loop until `/quit` or end of input.
pub async fn run_chat<R, W>(
    dispatcher: &Dispatcher,
    session: &mut Session,
    initial: Option<Persona>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    write_banner(out)?;

    let mut persona = match initial {
        Some(p) => p,
        None => loop {
            write_persona_menu(out)?;
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            match parse_persona(&line) {
                Some(p) => break p,
                None => writeln!(out, "不明な専門家です: {}", line.trim())?,
            }
        },
    };
    write_selected(out, persona)?;
    writeln!(out, "/help でコマンド一覧")?;

    loop {
        write!(out, "{}> ", persona.id())?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            writeln!(out, "質問を入力してください。")?;
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            let (name, arg) = command
                .split_once(char::is_whitespace)
                .map(|(n, a)| (n, a.trim()))
                .unwrap_or((command, ""));
            match name {
                "quit" | "exit" => break,
                "help" => {
                    writeln!(out, "{HELP}\n")?;
                    writeln!(out, "{}", disclaimer_text())?;
                }
                "personas" => write_persona_menu(out)?,
                "persona" => match parse_persona(arg) {
                    Some(p) => {
                        persona = p;
                        write_selected(out, persona)?;
                    }
                    None => writeln!(out, "不明な専門家です: {arg}")?,
                },
                "last" => match session.last() {
                    Some(last) => {
                        writeln!(out, "専門家: {}", last.persona)?;
                        writeln!(out, "質問: {}", last.question)?;
                        writeln!(out, "日時: {}", last.at.format("%Y-%m-%d %H:%M:%S UTC"))?;
                        writeln!(out, "回答:\n{}", last.result.display_text())?;
                    }
                    None => writeln!(out, "質問を入力して回答を取得してください。")?,
                },
                "feedback" => match arg.parse::<FeedbackRating>() {
                    Ok(rating) => match session.feedback(rating) {
                        Ok(thanks) => writeln!(out, "{thanks}")?,
                        Err(e) => writeln!(out, "{e}")?,
                    },
                    Err(e) => writeln!(out, "{e}")?,
                },
                other => writeln!(out, "不明なコマンド: /{other} (/help)")?,
            }
            continue;
        }

        writeln!(out, "{}", persona.working_message())?;
        out.flush()?;
        let result = dispatcher
            .dispatch(&ConsultationRequest::new(persona.id(), line))
            .await;
        writeln!(out, "💡 回答\n{}", result.display_text())?;
        let answered = result.is_success();
        session.record(persona, line, result);
        if answered {
            write_feedback_menu(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use expertdesk_dispatcher::providers::MockProvider;
    use expertdesk_dispatcher::DispatcherConfig;

    use super::*;

    async fn run(script: &str, initial: Option<Persona>, mock: Arc<MockProvider>) -> (String, Session) {
        let dispatcher = Dispatcher::new(DispatcherConfig::default().with_api_key("sk-test"), mock);
        let mut session = Session::new();
        let mut out = Vec::new();
        run_chat(&dispatcher, &mut session, initial, script.as_bytes(), &mut out)
            .await
            .unwrap();
        (String::from_utf8(out).unwrap(), session)
    }

    #[tokio::test]
    async fn test_select_by_number_then_ask() {
        let mock = Arc::new(MockProvider::new("mock").with_response("Use slicing or a loop."));
        let (out, session) = run("3\nHow do I reverse a string?\n/quit\n", None, mock.clone()).await;

        assert!(out.contains("選択中: 💻"));
        assert!(out.contains("プログラミングメンターが回答を準備中..."));
        assert!(out.contains("Use slicing or a loop."));
        assert!(out.contains("この回答は役に立ちましたか？"));
        assert_eq!(mock.call_count(), 1);

        let last = session.last().unwrap();
        assert_eq!(last.persona, "プログラミングメンター");
        assert_eq!(last.question, "How do I reverse a string?");
    }

    #[tokio::test]
    async fn test_invalid_selection_reprompts() {
        let mock = Arc::new(MockProvider::new("mock"));
        let (out, _) = run("9\nchef\ntravel\n/quit\n", None, mock).await;
        assert_eq!(out.matches("不明な専門家です").count(), 2);
        assert!(out.contains("選択中: ✈️"));
    }

    #[tokio::test]
    async fn test_disclaimer_on_start_and_help() {
        let mock = Arc::new(MockProvider::new("mock"));
        let (out, _) = run("/help\n", Some(Persona::HealthAdvisor), mock).await;

        assert!(out.starts_with("📋 アプリ概要\n"));
        assert_eq!(out.matches("🔒 注意事項").count(), 2);
        assert_eq!(
            out.matches("医療、法律、金融などの専門的な判断が必要な場合は、必ず専門家にご相談ください").count(),
            2
        );
        assert!(out.contains("/feedback <1-4>"));
    }

    #[tokio::test]
    async fn test_blank_line_is_not_sent() {
        let mock = Arc::new(MockProvider::new("mock"));
        let (out, session) = run("   \n", Some(Persona::HealthAdvisor), mock.clone()).await;
        assert!(out.contains("質問を入力してください。"));
        assert_eq!(mock.call_count(), 0);
        assert!(session.last().is_none());
    }

    #[tokio::test]
    async fn test_switch_persona_last_and_feedback() {
        let mock = Arc::new(MockProvider::new("mock").echoing());
        let script = "/feedback 1\n/persona recipe\n肉じゃがの作り方\n/last\n/feedback 2\n/feedback 7\n/bogus\n";
        let (out, session) = run(script, Some(Persona::HealthAdvisor), mock.clone()).await;

        assert!(out.contains("no consultation to rate yet"));
        assert!(out.contains("選択中: 👨‍🍳"));
        assert!(out.contains("専門家: 料理レシピアドバイザー"));
        assert!(out.contains("質問: 肉じゃがの作り方"));
        assert!(out.contains("フィードバックをありがとうございます！"));
        assert!(out.contains("rating must be between 1 and 4"));
        assert!(out.contains("不明なコマンド: /bogus"));

        let sent = &mock.requests()[0];
        assert_eq!(sent.messages[0].content, Persona::RecipeAdvisor.system_prompt());
        assert_eq!(session.last().unwrap().result.display_text(), "肉じゃがの作り方");
    }

    #[tokio::test]
    async fn test_provider_error_shown_in_place_of_answer() {
        let mock = Arc::new(MockProvider::new("mock").failing("connection reset"));
        let (out, session) = run("旅の持ち物は？\n", Some(Persona::TravelPlanner), mock).await;
        assert!(out.contains("エラーが発生しました: connection reset"));
        assert!(!out.contains("この回答は役に立ちましたか？"));
        assert!(!session.last().unwrap().result.is_success());
    }
}
