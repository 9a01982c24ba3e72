//! Integration tests for songq-filter.
//!
//! Exercises the public surface end to end: parse -> optimize -> match -> serialize.

// integration tests have no test module
#![allow(clippy::tests_outside_test_module)]

use chrono::{DateTime, TimeZone, Utc};
use songq_filter::{
    AudioFormat, ErrorKind, Predicate, SampleFormat, SongFilter, SongRecord, TagType,
};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap()
}

/// A small library with multi-valued, missing and mixed-case tags.
fn corpus() -> Vec<SongRecord> {
    vec![
        SongRecord::new("electronic/air/moon_safari/01.flac")
            .with_tag(TagType::Artist, "Air")
            .with_tag(TagType::Title, "La Femme d'Argent")
            .with_tag(TagType::Album, "Moon Safari")
            .with_last_modified(day(1))
            .with_added(day(2))
            .with_audio_format(AudioFormat::new(44100, SampleFormat::S16, 2))
            .with_priority(5),
        SongRecord::new("electronic/air/moon_safari/05.flac")
            .with_tag(TagType::Artist, "Air")
            .with_tag(TagType::Artist, "Beth Hirsch")
            .with_tag(TagType::Title, "All I Need")
            .with_tag(TagType::Album, "Moon Safari")
            .with_last_modified(day(3))
            .with_audio_format(AudioFormat::new(96000, SampleFormat::S24P32, 2))
            .with_priority(255),
        SongRecord::new("rock/the_beatles/love.mp3")
            .with_tag(TagType::Artist, "The Beatles")
            .with_tag(TagType::Title, "All You Need Is Love")
            .with_tag(TagType::Genre, "Rock")
            .with_last_modified(day(10))
            .with_added(day(10))
            .with_priority(4),
        SongRecord::new("rock/bob_dylan/lay_lady_lay.ogg")
            .with_tag(TagType::Artist, "Bob Dylan")
            .with_tag(TagType::Title, "Lay Lady Lay")
            .with_audio_format(AudioFormat::new(44100, SampleFormat::Float, 1)),
        SongRecord::new("unsorted/track.wav"),
        SongRecord::new("a/bc.mp3").with_tag(TagType::Artist, "AIR"),
    ]
}

/// Expressions covering every predicate kind and operator family.
const EXPRESSIONS: &[&str] = &[
    r#"(Artist == "Air")"#,
    r#"(Artist != "Air")"#,
    r#"(!(Artist == "Air"))"#,
    r#"(Title contains "Need")"#,
    r#"(Title !contains "need")"#,
    r#"(Title starts_with "All")"#,
    r#"(Title !starts_with "all")"#,
    r#"(artist eq_ci "air")"#,
    r#"(artist !eq_cs "Air")"#,
    r#"(title contains_ci "LOVE")"#,
    r#"(title !contains_ci "love")"#,
    r#"(title starts_with_ci "lay")"#,
    r#"(any == "Moon Safari")"#,
    r#"(any contains "the")"#,
    r#"(file starts_with "rock/")"#,
    r#"(!(file contains "air"))"#,
    r#"(base "electronic/air")"#,
    r#"(modified-since "2024-05-03T12:00:00Z")"#,
    r#"(added-since "1714651200")"#,
    r#"(AudioFormat == "44100:16:2")"#,
    r#"(AudioFormat =~ "*:*:2")"#,
    r#"(prio >= 5)"#,
    r#"(Genre =~ "r.ck")"#,
    r#"(Genre !~ "(?i)ROCK")"#,
    r#"((Artist == "Air") AND (Title contains "Need"))"#,
    r#"((base "rock") AND (!(prio >= 5)) AND (any starts_with 'Lay'))"#,
    r#"(!(!(Album == "Moon Safari")))"#,
    r#"((((prio >= 1))))"#,
];

fn matching_uris(filter: &SongFilter) -> Vec<String> {
    corpus()
        .into_iter()
        .filter(|song| filter.matches(song))
        .map(|song| song.uri)
        .collect()
}

#[test]
fn round_trip_preserves_matches() {
    for fold_case in [false, true] {
        for expression in EXPRESSIONS {
            let filter = SongFilter::parse(&[*expression], fold_case).unwrap();
            let serialized = filter.to_expression();

            // the serialized form is context free, so reparse with the opposite default
            let reparsed = SongFilter::parse(&[serialized.as_str()], !fold_case)
                .unwrap_or_else(|err| panic!("{expression} -> {serialized}: {err}"));

            assert_eq!(
                matching_uris(&filter),
                matching_uris(&reparsed),
                "{expression} -> {serialized}"
            );
        }
    }
}

#[test]
fn round_trip_of_legacy_pairs() {
    for fold_case in [false, true] {
        let filter = SongFilter::parse(&["artist", "Air", "title", "need"], fold_case).unwrap();
        let reparsed = SongFilter::parse(&[filter.to_expression().as_str()], false).unwrap();
        assert_eq!(matching_uris(&filter), matching_uris(&reparsed));
    }
}

#[test]
fn round_trip_of_escaped_values() {
    let filter = SongFilter::parse(&["title", r#"say "hi" \o/"#], false).unwrap();
    let expression = filter.to_expression();
    assert_eq!(expression, r#"(Title eq_cs "say \"hi\" \\o/")"#);
    assert_eq!(SongFilter::parse(&[expression.as_str()], false).unwrap(), filter);
}

#[test]
fn round_trip_of_far_future_timestamps() {
    let filter = SongFilter::parse(&[r#"(modified-since "300000000000")"#], false).unwrap();
    let expression = filter.to_expression();
    assert_eq!(expression, r#"(modified-since "300000000000")"#);
    assert_eq!(SongFilter::parse(&[expression.as_str()], false).unwrap(), filter);
    assert!(matching_uris(&filter).is_empty());
}

#[test]
fn optimization_preserves_matches() {
    for expression in EXPRESSIONS {
        let filter = SongFilter::parse(&[*expression], false).unwrap();
        let mut optimized = filter.clone();
        optimized.optimize();
        assert_eq!(matching_uris(&filter), matching_uris(&optimized), "{expression}");

        let mut twice = optimized.clone();
        twice.optimize();
        assert_eq!(optimized, twice, "{expression}");
    }
}

#[test]
fn and_expression_matches() {
    let filter = SongFilter::parse(&[r#"((artist == "Air") AND (title contains "Love"))"#], false).unwrap();
    let [Predicate::And(items)] = filter.items() else {
        panic!("expected a single And item");
    };
    assert_eq!(items.len(), 2);

    let song = SongRecord::new("x")
        .with_tag(TagType::Artist, "Air")
        .with_tag(TagType::Title, "Love Song");
    assert!(filter.matches(&song));
    assert!(!filter.matches(&SongRecord::new("x").with_tag(TagType::Artist, "Air")));
    assert!(!filter.matches(&SongRecord::new("x").with_tag(TagType::Title, "Love Song")));
}

#[test]
fn negated_artist() {
    let filter = SongFilter::parse(&[r#"(!(artist == "Air"))"#], false).unwrap();
    assert_eq!(
        matching_uris(&filter),
        [
            "rock/the_beatles/love.mp3",
            "rock/bob_dylan/lay_lady_lay.ogg",
            "unsorted/track.wav",
            "a/bc.mp3",
        ]
    );
}

#[test]
fn legacy_fold_case_widens_to_substring() {
    let bob = SongRecord::new("x").with_tag(TagType::Artist, "Bob Dylan");
    assert!(SongFilter::parse(&["artist", "Bob"], true).unwrap().matches(&bob));
    assert!(!SongFilter::parse(&["artist", "Bob"], false).unwrap().matches(&bob));
    assert!(SongFilter::parse(&["artist", "bob dylan"], true).unwrap().matches(&bob));
}

#[test]
fn base_containment() {
    let filter = SongFilter::parse(&["(base \"a/b\")"], false).unwrap();
    assert!(filter.matches(&SongRecord::new("a/b/c.mp3")));
    assert!(filter.matches(&SongRecord::new("a/b")));
    assert!(!filter.matches(&SongRecord::new("a/bc.mp3")));
}

#[test]
fn priority_threshold() {
    let filter = SongFilter::parse(&["(prio >= 5)"], false).unwrap();
    assert_eq!(
        matching_uris(&filter),
        ["electronic/air/moon_safari/01.flac", "electronic/air/moon_safari/05.flac"]
    );

    let err = SongFilter::parse(&["(prio >= 256)"], false).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPriority(256));
}

#[test]
fn without_base_prefix_delegation() {
    let filter = SongFilter::parse(&["base", "music/rock", "artist", "X"], false).unwrap();

    let below_music = filter.without_base_prefix("music");
    assert_eq!(below_music.base(), Some("rock"));
    assert_eq!(below_music.to_expression(), r#"((base "rock") AND (Artist eq_cs "X"))"#);

    let below_rock = filter.without_base_prefix("music/rock");
    assert_eq!(below_rock.base(), None);
    assert_eq!(below_rock.to_expression(), r#"(Artist eq_cs "X")"#);
    assert!(below_rock.has_other_than_base());
}

fn parse_err(args: &[&str]) -> ErrorKind {
    SongFilter::parse(args, false).unwrap_err().kind
}

#[test]
fn errors_are_distinguishable() {
    assert_eq!(parse_err(&[]), ErrorKind::ArgCount);
    assert_eq!(parse_err(&["artist"]), ErrorKind::ArgCount);
    assert_eq!(
        parse_err(&["colour", "red"]),
        ErrorKind::UnknownFilterType("colour".into())
    );
    assert_eq!(parse_err(&["base", "/etc"]), ErrorKind::BadUri("/etc".into()));
    assert_eq!(parse_err(&["(artist == \"x\")x"]), ErrorKind::UnparsedGarbage);
    assert_eq!(
        parse_err(&["(artist ~ \"x\")"]),
        ErrorKind::UnknownOperator("~".into())
    );
    assert_eq!(parse_err(&["((prio >= 1) OR (prio >= 2))"]), ErrorKind::ExpectedAnd);
    assert_eq!(parse_err(&["(artist == \"x"]), ErrorKind::UnterminatedQuote);
}

#[test]
fn trailing_whitespace_is_not_garbage() {
    let filter = SongFilter::parse(&["(artist == \"x\")  "], false).unwrap();
    assert_eq!(filter.items().len(), 1);
}

#[test]
fn error_display_points_at_column() {
    let err = SongFilter::parse(&["(artist ~ \"x\")"], false).unwrap_err();
    let display = err.to_string();
    let lines: Vec<&str> = display.lines().collect();
    assert_eq!(lines[0], "unknown filter operator: ~");
    assert_eq!(lines[1], "  (artist ~ \"x\")");
    assert_eq!(lines[2], "          ^");
    assert!(lines[3].starts_with("hint:"));
}
