//! Interpreter behavior over stubbed collaborators

mod common;

use common::{RecordingNavigator, RecordingSpeaker, StubNews, StubSearch};
use viola::news::NewsError;
use viola::{Action, CommandInterpreter, SiteLinks, SongCatalog};

fn interpreter_with(search: StubSearch, news: StubNews) -> CommandInterpreter {
    CommandInterpreter::new(
        SongCatalog::builtin(),
        SiteLinks::default(),
        Box::new(search),
        Box::new(news),
    )
}

fn interpreter() -> CommandInterpreter {
    interpreter_with(StubSearch::new("stub answer"), StubNews::with_headlines(&[]))
}

#[test]
fn site_commands_map_to_configured_urls() {
    let interp = interpreter();

    assert_eq!(
        interp.interpret("open google"),
        Action::OpenSite {
            message: "Opening Google...".to_string(),
            url: "https://www.google.com".to_string(),
        }
    );
    assert_eq!(
        interp.interpret("please open youtube now"),
        Action::OpenSite {
            message: "Opening Youtube...".to_string(),
            url: "https://www.youtube.com/@LotusOutlook".to_string(),
        }
    );
    assert_eq!(
        interp.interpret("open github"),
        Action::OpenSite {
            message: "Opening GitHub...".to_string(),
            url: "https://github.com/lotus-outlook-6".to_string(),
        }
    );
}

#[test]
fn known_song_resolves_to_url() {
    let interp = interpreter();

    assert_eq!(
        interp.interpret("play the Virtual"),
        Action::PlaySong {
            name: "virtual".to_string(),
            url: "https://www.youtube.com/watch?v=YVkUvmDQ3HY".to_string(),
        }
    );
}

#[test]
fn unknown_song_is_reported_not_searched() {
    let interp = interpreter();

    assert_eq!(
        interp.interpret("play freebird"),
        Action::SongNotFound {
            name: "freebird".to_string(),
        }
    );
}

#[test]
fn bare_play_lists_the_catalog() {
    let interp = interpreter();
    assert_eq!(interp.interpret("play"), Action::ListSongs);
}

#[test]
fn distance_phrasings_build_the_same_query() {
    let interp = interpreter();

    let expected = Action::Search {
        query: "distance from paris to london".to_string(),
    };
    assert_eq!(interp.interpret("how far is Paris from London"), expected);
    assert_eq!(
        interp.interpret("what is the distance between Paris and London"),
        expected
    );
}

#[test]
fn question_words_fall_through_to_search() {
    let interp = interpreter();

    assert_eq!(
        interp.interpret("who invented the telephone"),
        Action::Search {
            query: "who invented the telephone".to_string(),
        }
    );
}

#[test]
fn empty_transcript_is_unrecognized() {
    let interp = interpreter();
    assert_eq!(interp.interpret("   "), Action::Unrecognized);
}

#[tokio::test]
async fn open_site_speaks_then_navigates_once() {
    let interp = interpreter();
    let mut speaker = RecordingSpeaker::new();
    let navigator = RecordingNavigator::new();

    interp
        .handle("open google", &mut speaker, &navigator)
        .await
        .unwrap();

    assert_eq!(speaker.lines(), vec!["Opening Google...".to_string()]);
    assert_eq!(navigator.urls(), vec!["https://www.google.com".to_string()]);
}

#[tokio::test]
async fn playing_a_song_announces_and_opens_it() {
    let interp = interpreter();
    let mut speaker = RecordingSpeaker::new();
    let navigator = RecordingNavigator::new();

    interp
        .handle("play checkpoint", &mut speaker, &navigator)
        .await
        .unwrap();

    assert_eq!(speaker.lines(), vec!["Playing checkpoint".to_string()]);
    assert_eq!(
        navigator.urls(),
        vec!["https://www.youtube.com/watch?v=D5drYkLiLI8".to_string()]
    );
}

#[tokio::test]
async fn unknown_song_apology_lists_every_title() {
    let interp = interpreter();
    let mut speaker = RecordingSpeaker::new();
    let navigator = RecordingNavigator::new();

    interp
        .handle("play freebird", &mut speaker, &navigator)
        .await
        .unwrap();

    let lines = speaker.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Sorry, I don't have freebird in my library."));
    for name in ["virtual", "checkpoint", "ping", "overthinker", "playlist"] {
        assert!(lines[0].contains(name), "missing {name} in: {}", lines[0]);
    }
    assert!(navigator.urls().is_empty());
}

#[tokio::test]
async fn distance_question_reaches_search_and_is_spoken_verbatim() {
    let search = StubSearch::new("They are about 344 kilometers apart.");
    let queries = search.queries_handle();
    let interp = interpreter_with(search, StubNews::with_headlines(&[]));
    let mut speaker = RecordingSpeaker::new();
    let navigator = RecordingNavigator::new();

    interp
        .handle("how far is Paris from London", &mut speaker, &navigator)
        .await
        .unwrap();

    assert_eq!(
        *queries.lock().unwrap(),
        vec!["distance from paris to london".to_string()]
    );
    assert_eq!(
        speaker.lines(),
        vec!["They are about 344 kilometers apart.".to_string()]
    );
    assert!(navigator.urls().is_empty());
}

#[tokio::test]
async fn news_success_speaks_preamble_headlines_and_closing() {
    let news = StubNews::with_headlines(&[
        ("Markets rally", "Business Daily"),
        ("Rain expected", "Weather Desk"),
    ]);
    let interp = interpreter_with(StubSearch::new(""), news);
    let mut speaker = RecordingSpeaker::new();
    let navigator = RecordingNavigator::new();

    interp
        .handle("tell me the news", &mut speaker, &navigator)
        .await
        .unwrap();

    assert_eq!(
        speaker.lines(),
        vec![
            "Fetching the latest news from India. Please wait...".to_string(),
            "Headline 1: Markets rally from Business Daily".to_string(),
            "Headline 2: Rain expected from Weather Desk".to_string(),
            "That's all the news for now.".to_string(),
        ]
    );
}

#[tokio::test]
async fn news_failure_is_spoken_not_raised() {
    let interp = interpreter_with(
        StubSearch::new(""),
        StubNews::failing(NewsError::Status(401)),
    );
    let mut speaker = RecordingSpeaker::new();
    let navigator = RecordingNavigator::new();

    interp
        .handle("any headlines today", &mut speaker, &navigator)
        .await
        .unwrap();

    let lines = speaker.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "HTTP Error: 401. Please check your API key.");
}

#[tokio::test]
async fn unrecognized_transcript_gets_the_fallback_line() {
    let interp = interpreter();
    let mut speaker = RecordingSpeaker::new();
    let navigator = RecordingNavigator::new();

    interp.handle("", &mut speaker, &navigator).await.unwrap();

    assert_eq!(
        speaker.lines(),
        vec!["I didn't understand that command".to_string()]
    );
}
