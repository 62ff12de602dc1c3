use spotify_remote_rs::{
    extract_field, fit_to_width, strip_field_envelope, ExtractionResult, SliceSource,
};

// A realistic pretty-printed currently-playing body, abridged to the parts
// the extractor cares about. One field per line, as the service emits it.
const CURRENTLY_PLAYING: &str = r#"{
  "timestamp" : 1691234567890,
  "context" : {
    "type" : "album",
    "href" : "https://api.spotify.com/v1/albums/4LH4d3cOWNNsVw41Gqt2kv"
  },
  "progress_ms" : 44272,
  "item" : {
    "album" : {
      "album_type" : "album",
      "artists" : [ {
        "id" : "0k17h0D3J5VfsdmQ1iZtE9",
        "name" : "Pink Floyd",
        "type" : "artist"
      } ],
      "name" : "The Dark Side of the Moon",
      "release_date" : "1973-03-01"
    },
    "artists" : [ {
      "id" : "0k17h0D3J5VfsdmQ1iZtE9",
      "name" : "Pink Floyd",
      "type" : "artist"
    } ],
    "disc_number" : 1,
    "duration_ms" : 382296,
    "explicit" : false,
    "name" : "Time",
    "track_number" : 4,
    "uri" : "spotify:track:3TO7bbrUKrOSPGRTB5MeCz"
  },
  "currently_playing_type" : "track",
  "is_playing" : true
}"#;

#[tokio::test]
async fn extract_returns_value_without_trailing_comma() {
    let payload = b"track:\"value\",\nnext_line\n";
    let mut source = SliceSource::new(payload);
    let result = extract_field(&mut source, "track").await.unwrap();
    assert_eq!(result, ExtractionResult::Found("value".to_string()));
}

#[tokio::test]
async fn extract_reports_not_found_for_absent_key() {
    let payload = b"other:\"value\",\nmore:\"stuff\"\n";
    let mut source = SliceSource::new(payload);
    let result = extract_field(&mut source, "missing").await.unwrap();
    assert_eq!(result, ExtractionResult::NotFound);
}

#[tokio::test]
async fn extract_reports_truncated_when_source_closes_mid_value() {
    let payload = b"name:\"Unfinished Sympa";
    let mut source = SliceSource::new(payload);
    let result = extract_field(&mut source, "name").await.unwrap();
    assert_eq!(result, ExtractionResult::Truncated);
}

#[tokio::test]
async fn extract_reports_truncated_when_source_closes_after_key() {
    // Key matched, delimiter never arrives
    let payload = b"name";
    let mut source = SliceSource::new(payload);
    let result = extract_field(&mut source, "name").await.unwrap();
    assert_eq!(result, ExtractionResult::Truncated);
}

#[tokio::test]
async fn failed_key_match_can_restart_on_first_byte() {
    // The leading "nn" must not poison the match for "name"
    let payload = b"nnname:\"x\",\n";
    let mut source = SliceSource::new(payload);
    let result = extract_field(&mut source, "name").await.unwrap();
    assert_eq!(result, ExtractionResult::Found("x".to_string()));
}

#[tokio::test]
async fn sequential_extraction_walks_the_document_in_order() {
    let mut source = SliceSource::new(CURRENTLY_PLAYING.as_bytes());

    let progress = extract_field(&mut source, "progress_ms").await.unwrap();
    let artist = extract_field(&mut source, "name").await.unwrap();
    let album = extract_field(&mut source, "name").await.unwrap();
    let duration = extract_field(&mut source, "duration_ms").await.unwrap();
    let track = extract_field(&mut source, "name").await.unwrap();
    let playing = extract_field(&mut source, "is_playing").await.unwrap();

    assert_eq!(progress, ExtractionResult::Found("44272".to_string()));
    assert_eq!(artist, ExtractionResult::Found("Pink Floyd".to_string()));
    assert_eq!(
        album,
        ExtractionResult::Found("The Dark Side of the Moon".to_string())
    );
    assert_eq!(duration, ExtractionResult::Found("382296".to_string()));
    assert_eq!(track, ExtractionResult::Found("Time".to_string()));
    assert_eq!(playing, ExtractionResult::Found("true".to_string()));
}

#[tokio::test]
async fn extraction_consumes_the_source_so_earlier_keys_are_gone() {
    let mut source = SliceSource::new(CURRENTLY_PLAYING.as_bytes());
    let first = extract_field(&mut source, "is_playing").await.unwrap();
    assert_eq!(first, ExtractionResult::Found("true".to_string()));

    // progress_ms appeared before is_playing in the document
    let second = extract_field(&mut source, "progress_ms").await.unwrap();
    assert_eq!(second, ExtractionResult::NotFound);
}

#[test]
fn envelope_strip_handles_quoted_and_bare_values() {
    assert_eq!(strip_field_envelope(b"\"value\","), "value");
    assert_eq!(strip_field_envelope(b"value\","), "value");
    assert_eq!(strip_field_envelope(b"\"value\""), "value");
    assert_eq!(strip_field_envelope(b"12345,"), "12345");
    assert_eq!(strip_field_envelope(b"12345"), "12345");
    assert_eq!(strip_field_envelope(b"true"), "true");
    assert_eq!(strip_field_envelope(b"\"\","), "");
    assert_eq!(strip_field_envelope(b""), "");
}

#[test]
fn fit_to_width_is_identity_for_values_that_fit() {
    let width = |s: &str| s.chars().count() as u32 * 6;
    assert_eq!(fit_to_width("Time", width, 95), "Time");
    // Exactly at the limit is still identity
    assert_eq!(fit_to_width("abcde", width, 30), "abcde");
}

#[test]
fn fit_to_width_keeps_the_longest_prefix_that_fits() {
    let width = |s: &str| s.chars().count() as u32 * 6;
    let fitted = fit_to_width("ABCDEFGH", width, 30);
    assert_eq!(fitted, "ABCDE...");

    // The prefix fits, the prefix plus one more character would not
    assert!(width("ABCDE") <= 30);
    assert!(width("ABCDEF") > 30);
}

#[test]
fn fit_to_width_handles_a_limit_too_small_for_any_character() {
    let width = |s: &str| s.chars().count() as u32 * 6;
    assert_eq!(fit_to_width("ABC", width, 3), "...");
}
