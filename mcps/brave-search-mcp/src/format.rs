//! Plain-text rendering of search results
//!
//! Tools return text meant to be read by a language model, so every
//! renderer emits one `Label: value` line per field and fills absent fields
//! with a fixed placeholder instead of dropping the line.

use chrono::Weekday;

use crate::api::{DaySlot, NewsResult, OpeningHours, VideoResult, WebResult};
use crate::local::MergedPoiView;

/// Separator between rendered POI and video blocks
pub const BLOCK_SEPARATOR: &str = "\n---\n";

/// Separator between rendered web and news results
const RESULT_SEPARATOR: &str = "\n\n";

pub fn format_web_results(query: &str, results: &[WebResult]) -> String {
    if results.is_empty() {
        return format!("No results found for \"{}\"", query);
    }

    results
        .iter()
        .map(|r| {
            format!(
                "Title: {}\nURL: {}\nDescription: {}",
                r.title,
                r.url,
                r.description.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join(RESULT_SEPARATOR)
}

pub fn format_news_results(query: &str, results: &[NewsResult]) -> String {
    if results.is_empty() {
        return format!("No news results found for \"{}\"", query);
    }

    results
        .iter()
        .map(|r| {
            format!(
                "Title: {}\nURL: {}\nAge: {}\nDescription: {}",
                r.title,
                r.url,
                r.age.as_deref().unwrap_or("N/A"),
                r.description.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join(RESULT_SEPARATOR)
}

pub fn format_video_results(query: &str, results: &[VideoResult]) -> String {
    if results.is_empty() {
        return format!("No video results found for \"{}\"", query);
    }

    results
        .iter()
        .map(format_video)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn format_video(video: &VideoResult) -> String {
    let data = &video.video;
    let mut lines = vec![
        format!("Title: {}", video.title),
        format!("URL: {}", video.url),
        format!("Description: {}", video.description.as_deref().unwrap_or("")),
        format!("Age: {}", video.age.as_deref().unwrap_or("N/A")),
        format!("Duration: {}", data.duration.as_deref().unwrap_or("N/A")),
        format!(
            "Views: {}",
            data.views.map_or_else(|| "N/A".to_string(), |v| v.to_string())
        ),
        format!("Creator: {}", data.creator.as_deref().unwrap_or("N/A")),
    ];

    match data.requires_subscription {
        Some(true) => lines.push("Requires subscription".to_string()),
        Some(false) => lines.push("No subscription".to_string()),
        None => {}
    }

    if let Some(tags) = data.tags.as_ref().filter(|t| !t.is_empty()) {
        lines.push(format!("Tags: {}", tags.join(", ")));
    }

    lines.join("\n")
}

/// Render one POI joined with its description
pub fn format_poi(view: &MergedPoiView) -> String {
    let poi = &view.record;
    let mut lines = vec![format!(
        "Name: {}",
        poi.title.as_deref().unwrap_or("No name found")
    )];

    if let Some(cuisines) = poi.serves_cuisine.as_ref().filter(|c| !c.is_empty()) {
        lines.push(format!("Cuisine: {}", cuisines.join(", ")));
    }

    let address = poi
        .postal_address
        .as_ref()
        .and_then(|a| a.display_address.as_deref());
    let contact = poi.contact.as_ref();
    let rating = poi.rating.as_ref();

    lines.push(format!("Address: {}", address.unwrap_or("No address found")));
    lines.push(format!(
        "Phone: {}",
        contact
            .and_then(|c| c.telephone.as_deref())
            .unwrap_or("No phone number found")
    ));
    lines.push(format!(
        "Email: {}",
        contact
            .and_then(|c| c.email.as_deref())
            .unwrap_or("No email found")
    ));
    lines.push(format!(
        "Price Range: {}",
        poi.price_range.as_deref().unwrap_or("No price range found")
    ));
    lines.push(format!(
        "Ratings: {} ({}) reviews",
        rating
            .and_then(|r| r.rating_value)
            .filter(|v| *v > 0.0)
            .map_or_else(|| "N/A".to_string(), |v| v.to_string()),
        rating.and_then(|r| r.review_count).unwrap_or(0)
    ));

    match poi.opening_hours.as_ref().and_then(format_opening_hours) {
        Some(hours) => {
            lines.push("Hours:".to_string());
            lines.extend(hours.lines().map(|line| format!("  {}", line)));
        }
        None => lines.push("Hours: No opening hours found".to_string()),
    }

    lines.push(format!(
        "Description: {}",
        view.description.as_deref().unwrap_or("No description found")
    ));

    lines.join("\n")
}

/// A run of consecutive weekdays sharing the same intervals
struct DayRun<'a> {
    first: &'a str,
    last: &'a str,
    last_weekday: Option<Weekday>,
    labels: Vec<&'a str>,
    intervals: String,
}

fn day_label(slot: &DaySlot) -> Option<&str> {
    slot.abbr_name.as_deref().or(slot.full_name.as_deref())
}

fn intervals(slots: &[DaySlot]) -> String {
    slots
        .iter()
        .map(|s| {
            format!(
                "{}–{}",
                s.opens.as_deref().unwrap_or("?"),
                s.closes.as_deref().unwrap_or("?")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn same_day(a: &str, b: &str) -> bool {
    match (a.parse::<Weekday>(), b.parse::<Weekday>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.eq_ignore_ascii_case(b),
    }
}

/// Compress a weekly schedule into readable lines
///
/// The first line repeats today's hours. Consecutive weekdays with identical
/// intervals collapse into one `Mon–Fri` style line; the line covering today
/// is suffixed with `(today)`. Returns `None` when the schedule is empty.
pub fn format_opening_hours(hours: &OpeningHours) -> Option<String> {
    let mut lines = Vec::new();

    let today = hours.current_day.first();
    if let Some(slot) = today {
        let name = slot
            .full_name
            .as_deref()
            .or(slot.abbr_name.as_deref())
            .unwrap_or("Today");
        lines.push(format!("Today: {} {}", name, intervals(&hours.current_day)));
    }
    let today_label = today.and_then(day_label);

    let mut runs: Vec<DayRun> = Vec::new();
    for slots in &hours.days {
        let Some(label) = slots.first().and_then(day_label) else {
            continue;
        };
        let weekday = label.parse::<Weekday>().ok();
        let day_intervals = intervals(slots);

        if let Some(run) = runs.last_mut() {
            let adjacent = matches!(
                (run.last_weekday, weekday),
                (Some(prev), Some(next)) if prev.succ() == next
            );
            if adjacent && run.intervals == day_intervals {
                run.last = label;
                run.last_weekday = weekday;
                run.labels.push(label);
                continue;
            }
        }

        runs.push(DayRun {
            first: label,
            last: label,
            last_weekday: weekday,
            labels: vec![label],
            intervals: day_intervals,
        });
    }

    for run in &runs {
        let range = if run.first == run.last {
            run.first.to_string()
        } else {
            format!("{}–{}", run.first, run.last)
        };
        let is_today = today_label.is_some_and(|t| run.labels.iter().any(|l| same_day(l, t)));
        let marker = if is_today { " (today)" } else { "" };
        lines.push(format!("{}: {}{}", range, run.intervals, marker));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Contact, LocationId, PoiRecord, PostalAddress, Rating, VideoData};

    fn slot(abbr: &str, full: &str, opens: &str, closes: &str) -> DaySlot {
        DaySlot {
            abbr_name: Some(abbr.to_string()),
            full_name: Some(full.to_string()),
            opens: Some(opens.to_string()),
            closes: Some(closes.to_string()),
        }
    }

    fn weekday_schedule(today: DaySlot) -> OpeningHours {
        OpeningHours {
            current_day: vec![today],
            days: vec![
                vec![slot("Mon", "Monday", "09:00", "17:00")],
                vec![slot("Tue", "Tuesday", "09:00", "17:00")],
                vec![slot("Wed", "Wednesday", "09:00", "17:00")],
                vec![slot("Thu", "Thursday", "09:00", "17:00")],
                vec![slot("Fri", "Friday", "09:00", "17:00")],
                vec![slot("Sat", "Saturday", "10:00", "14:00")],
                vec![slot("Sun", "Sunday", "11:00", "13:00")],
            ],
        }
    }

    fn view(record: PoiRecord, description: Option<&str>) -> MergedPoiView {
        MergedPoiView {
            id: LocationId::from("loc-1"),
            record,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_hours_group_weekdays_and_mark_today() {
        let hours = weekday_schedule(slot("Wed", "Wednesday", "09:00", "17:00"));
        let text = format_opening_hours(&hours).unwrap();

        assert_eq!(
            text,
            "Today: Wednesday 09:00–17:00\n\
             Mon–Fri: 09:00–17:00 (today)\n\
             Sat: 10:00–14:00\n\
             Sun: 11:00–13:00"
        );
    }

    #[test]
    fn test_hours_mark_today_on_single_day_line() {
        let hours = weekday_schedule(slot("Sat", "Saturday", "10:00", "14:00"));
        let text = format_opening_hours(&hours).unwrap();

        assert!(text.starts_with("Today: Saturday 10:00–14:00\n"));
        assert!(text.contains("Mon–Fri: 09:00–17:00\n"));
        assert!(text.contains("Sat: 10:00–14:00 (today)"));
        assert!(!text.contains("Sun: 11:00–13:00 (today)"));
    }

    #[test]
    fn test_hours_do_not_bridge_closed_days() {
        let hours = OpeningHours {
            current_day: vec![],
            days: vec![
                vec![slot("Mon", "Monday", "09:00", "17:00")],
                vec![slot("Tue", "Tuesday", "09:00", "17:00")],
                vec![slot("Thu", "Thursday", "09:00", "17:00")],
            ],
        };

        assert_eq!(
            format_opening_hours(&hours).unwrap(),
            "Mon–Tue: 09:00–17:00\nThu: 09:00–17:00"
        );
    }

    #[test]
    fn test_hours_split_shifts() {
        let hours = OpeningHours {
            current_day: vec![
                slot("Mon", "Monday", "11:00", "14:00"),
                slot("Mon", "Monday", "17:00", "22:00"),
            ],
            days: vec![
                vec![
                    slot("Mon", "Monday", "11:00", "14:00"),
                    slot("Mon", "Monday", "17:00", "22:00"),
                ],
                vec![
                    slot("Tue", "Tuesday", "11:00", "14:00"),
                    slot("Tue", "Tuesday", "17:00", "22:00"),
                ],
            ],
        };

        assert_eq!(
            format_opening_hours(&hours).unwrap(),
            "Today: Monday 11:00–14:00, 17:00–22:00\n\
             Mon–Tue: 11:00–14:00, 17:00–22:00 (today)"
        );
    }

    #[test]
    fn test_empty_hours() {
        assert!(format_opening_hours(&OpeningHours::default()).is_none());
    }

    #[test]
    fn test_poi_full_block() {
        let record = PoiRecord {
            title: Some("Joe's Pizza".to_string()),
            serves_cuisine: Some(vec!["pizza".to_string(), "italian".to_string()]),
            postal_address: Some(PostalAddress {
                display_address: Some("7 Carmine St, New York, NY".to_string()),
            }),
            contact: Some(Contact {
                telephone: Some("+1 212-366-1182".to_string()),
                email: None,
            }),
            price_range: Some("$".to_string()),
            rating: Some(Rating {
                rating_value: Some(4.5),
                review_count: Some(1200),
            }),
            opening_hours: Some(OpeningHours {
                current_day: vec![slot("Mon", "Monday", "10:00", "23:00")],
                days: vec![vec![slot("Mon", "Monday", "10:00", "23:00")]],
            }),
        };

        let text = format_poi(&view(record, Some("A classic slice shop.")));

        assert_eq!(
            text,
            "Name: Joe's Pizza\n\
             Cuisine: pizza, italian\n\
             Address: 7 Carmine St, New York, NY\n\
             Phone: +1 212-366-1182\n\
             Email: No email found\n\
             Price Range: $\n\
             Ratings: 4.5 (1200) reviews\n\
             Hours:\n\
             \x20 Today: Monday 10:00–23:00\n\
             \x20 Mon: 10:00–23:00 (today)\n\
             Description: A classic slice shop."
        );
    }

    #[test]
    fn test_poi_placeholders() {
        let text = format_poi(&view(PoiRecord::default(), None));

        assert!(text.starts_with("Name: No name found\nAddress: No address found\n"));
        assert!(!text.contains("Cuisine:"));
        assert!(text.contains("Phone: No phone number found"));
        assert!(text.contains("Email: No email found"));
        assert!(text.contains("Price Range: No price range found"));
        assert!(text.contains("Ratings: N/A (0) reviews"));
        assert!(text.contains("Hours: No opening hours found"));
        assert!(text.ends_with("Description: No description found"));
    }

    #[test]
    fn test_rating_without_value_keeps_review_count() {
        let record = PoiRecord {
            rating: Some(Rating {
                rating_value: None,
                review_count: Some(7),
            }),
            ..PoiRecord::default()
        };
        assert!(format_poi(&view(record, None)).contains("Ratings: N/A (7) reviews"));
    }

    #[test]
    fn test_zero_rating_renders_as_missing() {
        let record = PoiRecord {
            rating: Some(Rating {
                rating_value: Some(0.0),
                review_count: Some(3),
            }),
            ..PoiRecord::default()
        };
        assert!(format_poi(&view(record, None)).contains("Ratings: N/A (3) reviews"));
    }

    #[test]
    fn test_web_results() {
        let results = vec![
            WebResult {
                title: "Rust".to_string(),
                url: "https://www.rust-lang.org".to_string(),
                description: Some("A language".to_string()),
            },
            WebResult {
                title: "Crates".to_string(),
                url: "https://crates.io".to_string(),
                description: None,
            },
        ];

        assert_eq!(
            format_web_results("rust", &results),
            "Title: Rust\nURL: https://www.rust-lang.org\nDescription: A language\n\n\
             Title: Crates\nURL: https://crates.io\nDescription: "
        );
        assert_eq!(format_web_results("zzz", &[]), "No results found for \"zzz\"");
    }

    #[test]
    fn test_news_results() {
        let results = vec![NewsResult {
            title: "Launch".to_string(),
            url: "https://news.example.com/launch".to_string(),
            description: Some("It flew".to_string()),
            age: Some("2 hours ago".to_string()),
        }];

        assert_eq!(
            format_news_results("launch", &results),
            "Title: Launch\nURL: https://news.example.com/launch\nAge: 2 hours ago\nDescription: It flew"
        );
        assert_eq!(
            format_news_results("launch", &[]),
            "No news results found for \"launch\""
        );
    }

    #[test]
    fn test_video_results() {
        let results = vec![
            VideoResult {
                title: "Intro".to_string(),
                url: "https://video.example.com/1".to_string(),
                description: Some("Basics".to_string()),
                age: Some("1 year ago".to_string()),
                video: VideoData {
                    duration: Some("12:34".to_string()),
                    views: Some(1000),
                    creator: Some("Ferris".to_string()),
                    requires_subscription: Some(false),
                    tags: Some(vec!["rust".to_string(), "tutorial".to_string()]),
                },
            },
            VideoResult {
                title: "Bare".to_string(),
                url: "https://video.example.com/2".to_string(),
                ..VideoResult::default()
            },
        ];

        let text = format_video_results("rust", &results);
        let blocks: Vec<&str> = text.split(BLOCK_SEPARATOR).collect();

        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "Title: Intro\nURL: https://video.example.com/1\nDescription: Basics\n\
             Age: 1 year ago\nDuration: 12:34\nViews: 1000\nCreator: Ferris\n\
             No subscription\nTags: rust, tutorial"
        );
        assert!(blocks[1].ends_with("Creator: N/A"));
        assert_eq!(
            format_video_results("rust", &[]),
            "No video results found for \"rust\""
        );
    }
}
