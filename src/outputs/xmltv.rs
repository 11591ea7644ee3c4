//! XMLTV document generation.
//!
//! Builds the guide document with `quick-xml`'s event writer so that every
//! attribute value and text node is escaped.
//!
//! # Document Structure
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <tv generator-info-name="github-epg-sample">
//!   <channel id="ch1">
//!     <display-name>Channel One</display-name>
//!     <icon src="https://example.com/ch1.png"/>
//!   </channel>
//!   <programme start="20240101080000 +0000" stop="20240101100000 +0000" channel="ch1">
//!     <title lang="en">Morning Show</title>
//!     <desc lang="en">Daily morning show.</desc>
//!   </programme>
//! </tv>
//! ```
//!
//! Channels are written in input order, followed by programmes in schedule
//! order.

use crate::error::{GuideError, GuideResult};
use crate::models::{Channel, Programme};
use crate::utils::to_xmltv_timestamp;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, info, instrument};

/// Value of the root `generator-info-name` attribute.
pub const GENERATOR_INFO_NAME: &str = "github-epg-sample";

/// Language tag of programme titles and descriptions.
const PROGRAMME_LANG: &str = "en";

/// Serialize `channels` and `schedule` into a pretty-printed XMLTV document.
///
/// # Returns
///
/// The UTF-8 encoded document, terminated by a newline.
#[instrument(level = "info", skip_all, fields(channels = channels.len(), programmes = schedule.len()))]
pub fn emit(channels: &[Channel], schedule: &[Programme]) -> GuideResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write(
        &mut writer,
        Event::Start(BytesStart::new("tv").with_attributes([("generator-info-name", GENERATOR_INFO_NAME)])),
    )?;

    for channel in channels {
        write_channel(&mut writer, channel)?;
    }
    debug!(count = channels.len(), "Wrote channel elements");

    for programme in schedule {
        write_programme(&mut writer, programme)?;
    }
    debug!(count = schedule.len(), "Wrote programme elements");

    write(&mut writer, Event::End(BytesEnd::new("tv")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    info!(bytes = bytes.len(), "Serialized XMLTV document");
    Ok(bytes)
}

fn write_channel(writer: &mut Writer<Vec<u8>>, channel: &Channel) -> GuideResult<()> {
    write(
        writer,
        Event::Start(BytesStart::new("channel").with_attributes([("id", channel.id.as_str())])),
    )?;
    write_text_element(writer, "display-name", &[], &channel.display_name)?;
    if let Some(src) = channel.icon_src() {
        write(writer, Event::Empty(BytesStart::new("icon").with_attributes([("src", src)])))?;
    }
    write(writer, Event::End(BytesEnd::new("channel")))
}

fn write_programme(writer: &mut Writer<Vec<u8>>, programme: &Programme) -> GuideResult<()> {
    let start = to_xmltv_timestamp(programme.start);
    let stop = to_xmltv_timestamp(programme.stop);
    let element = BytesStart::new("programme").with_attributes([
        ("start", start.as_str()),
        ("stop", stop.as_str()),
        ("channel", programme.channel.as_str()),
    ]);

    write(writer, Event::Start(element))?;
    write_text_element(writer, "title", &[("lang", PROGRAMME_LANG)], &programme.title)?;
    write_text_element(writer, "desc", &[("lang", PROGRAMME_LANG)], &programme.description)?;
    write(writer, Event::End(BytesEnd::new("programme")))
}

/// `<name attrs...>text</name>`
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> GuideResult<()> {
    write(
        writer,
        Event::Start(BytesStart::new(name).with_attributes(attributes.iter().copied())),
    )?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> GuideResult<()> {
    writer.write_event(event).map_err(GuideError::xml)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::schedule::generate;
    use crate::utils::parse_xmltv_timestamp;
    use chrono::NaiveDate;
    use quick_xml::Reader;
    use std::collections::HashMap;

    /// Flattened view of a parsed guide document.
    #[derive(Debug, Default)]
    pub(crate) struct ParsedGuide {
        pub roots: Vec<(String, HashMap<String, String>)>,
        pub channels: Vec<ParsedChannel>,
        pub programmes: Vec<ParsedProgramme>,
    }

    #[derive(Debug, Default)]
    pub(crate) struct ParsedChannel {
        pub id: String,
        pub display_name: String,
        pub icon: Option<String>,
    }

    #[derive(Debug, Default)]
    pub(crate) struct ParsedProgramme {
        pub start: String,
        pub stop: String,
        pub channel: String,
        pub title: String,
        pub desc: String,
        pub title_lang: Option<String>,
        pub desc_lang: Option<String>,
    }

    fn attributes(element: &BytesStart) -> HashMap<String, String> {
        element
            .attributes()
            .flatten()
            .map(|attr| {
                (
                    String::from_utf8(attr.key.as_ref().to_vec()).unwrap(),
                    String::from_utf8(attr.value.to_vec()).unwrap(),
                )
            })
            .collect()
    }

    /// Parse an emitted document back into its channels and programmes.
    pub(crate) fn parse_guide(xml: &str) -> ParsedGuide {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut guide = ParsedGuide::default();
        let mut stack: Vec<String> = Vec::new();

        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    let attrs = attributes(&e);
                    match name.as_str() {
                        "channel" => guide.channels.push(ParsedChannel {
                            id: attrs["id"].clone(),
                            ..Default::default()
                        }),
                        "programme" => guide.programmes.push(ParsedProgramme {
                            start: attrs["start"].clone(),
                            stop: attrs["stop"].clone(),
                            channel: attrs["channel"].clone(),
                            ..Default::default()
                        }),
                        "title" => guide.programmes.last_mut().unwrap().title_lang = attrs.get("lang").cloned(),
                        "desc" => guide.programmes.last_mut().unwrap().desc_lang = attrs.get("lang").cloned(),
                        _ => {}
                    }
                    if stack.is_empty() {
                        guide.roots.push((name.clone(), attrs));
                    }
                    stack.push(name);
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == b"icon" {
                        guide.channels.last_mut().unwrap().icon = attributes(&e).get("src").cloned();
                    }
                }
                Event::Text(e) => {
                    let text = std::str::from_utf8(&e).unwrap().to_string();
                    match stack.last().map(String::as_str) {
                        Some("display-name") => guide.channels.last_mut().unwrap().display_name = text,
                        Some("title") => guide.programmes.last_mut().unwrap().title = text,
                        Some("desc") => guide.programmes.last_mut().unwrap().desc = text,
                        _ => {}
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        guide
    }

    fn channel(id: &str, name: &str, icon: Option<&str>) -> Channel {
        Channel {
            id: id.to_string(),
            display_name: name.to_string(),
            icon: icon.map(str::to_string),
        }
    }

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_declaration_and_root() {
        let xml = String::from_utf8(emit(&[], &[]).unwrap()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));

        let guide = parse_guide(&xml);
        assert_eq!(guide.roots.len(), 1);
        assert_eq!(guide.roots[0].0, "tv");
        assert_eq!(guide.roots[0].1["generator-info-name"], GENERATOR_INFO_NAME);
    }

    #[test]
    fn test_empty_channel_list_has_no_children() {
        let xml = String::from_utf8(emit(&[], &[]).unwrap()).unwrap();
        let guide = parse_guide(&xml);
        assert!(guide.channels.is_empty());
        assert!(guide.programmes.is_empty());
        assert!(!xml.contains("<channel"));
        assert!(!xml.contains("<programme"));
    }

    #[test]
    fn test_single_channel_scenario() {
        let channels = vec![channel("ch1", "Channel One", None)];
        let schedule = generate(&channels, jan_first(), 1).unwrap();
        let xml = String::from_utf8(emit(&channels, &schedule).unwrap()).unwrap();
        let guide = parse_guide(&xml);

        assert_eq!(guide.channels.len(), 1);
        assert_eq!(guide.channels[0].id, "ch1");
        assert_eq!(guide.channels[0].display_name, "Channel One");
        assert_eq!(guide.channels[0].icon, None);
        assert!(!xml.contains("<icon"));

        let windows = guide
            .programmes
            .iter()
            .map(|p| (p.title.as_str(), p.start.as_str(), p.stop.as_str(), p.channel.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            windows,
            vec![
                ("Morning Show", "20240101080000 +0000", "20240101100000 +0000", "ch1"),
                ("Midday Magazine", "20240101120000 +0000", "20240101140000 +0000", "ch1"),
                ("Evening News", "20240101200000 +0000", "20240101220000 +0000", "ch1"),
            ]
        );
        assert_eq!(guide.programmes[0].desc, "Daily morning show.");
    }

    #[test]
    fn test_icon_only_when_present() {
        let channels = vec![
            channel("ch1", "One", Some("https://example.com/1.png")),
            channel("ch2", "Two", Some("")),
            channel("ch3", "Three", None),
        ];
        let xml = String::from_utf8(emit(&channels, &[]).unwrap()).unwrap();
        let guide = parse_guide(&xml);

        let icons = guide.channels.iter().map(|c| c.icon.as_deref()).collect::<Vec<_>>();
        assert_eq!(icons, vec![Some("https://example.com/1.png"), None, None]);
        assert_eq!(xml.matches("<icon").count(), 1);
    }

    #[test]
    fn test_structure_matches_schedule() {
        let channels = vec![
            channel("alpha", "Alpha", Some("https://example.com/a.png")),
            channel("beta", "Beta", None),
        ];
        let schedule = generate(&channels, jan_first(), 7).unwrap();
        let xml = String::from_utf8(emit(&channels, &schedule).unwrap()).unwrap();
        let guide = parse_guide(&xml);

        assert_eq!(guide.roots.len(), 1);
        let ids = guide.channels.iter().map(|c| c.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["alpha", "beta"]);

        assert_eq!(guide.programmes.len(), schedule.len());
        for (parsed, source) in guide.programmes.iter().zip(&schedule) {
            assert_eq!(parse_xmltv_timestamp(&parsed.start).unwrap(), source.start);
            assert_eq!(parse_xmltv_timestamp(&parsed.stop).unwrap(), source.stop);
            assert_eq!(parsed.channel, source.channel);
            assert!(ids.contains(&parsed.channel.as_str()));
            assert_eq!(parsed.title, source.title);
            assert_eq!(parsed.desc, source.description);
            assert_eq!(parsed.title_lang.as_deref(), Some("en"));
            assert_eq!(parsed.desc_lang.as_deref(), Some("en"));
        }
    }

    #[test]
    fn test_channels_precede_programmes() {
        let channels = vec![channel("ch1", "One", None), channel("ch2", "Two", None)];
        let schedule = generate(&channels, jan_first(), 1).unwrap();
        let xml = String::from_utf8(emit(&channels, &schedule).unwrap()).unwrap();

        let last_channel = xml.rfind("<channel ").unwrap();
        let first_programme = xml.find("<programme ").unwrap();
        assert!(last_channel < first_programme);
    }

    #[test]
    fn test_escapes_markup() {
        let channels = vec![channel("news&co", "News <&> \"Co\"", None)];
        let xml = String::from_utf8(emit(&channels, &[]).unwrap()).unwrap();
        assert!(xml.contains(r#"id="news&amp;co""#));
        assert!(xml.contains("News &lt;&amp;&gt;"));
        assert!(!xml.contains("News <&>"));
    }

    #[test]
    fn test_emit_is_deterministic() {
        let channels = vec![channel("ch1", "One", None)];
        let schedule = generate(&channels, jan_first(), 7).unwrap();
        assert_eq!(emit(&channels, &schedule).unwrap(), emit(&channels, &schedule).unwrap());
    }
}
