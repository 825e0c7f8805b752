use crate::{TriggerRule, parse, parse_optional};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::time::Duration;

fn hm(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2013, 2, 12).unwrap().and_hms_opt(h, m, 0).unwrap()
}

#[test]
fn event_name_examples() {
    // (descriptor, expected event name)
    let cases: Vec<(&str, &str)> = vec![
        ("TestEventName", "TestEventName"),
        ("TestEventName:", "TestEventName"),
        (":Foo=1", ""),
        (":", ""),
        ("A:B:C", "A"),
        ("  spaced  :X=1", "  spaced  "),
        ("Évènement:Delay=1", "Évènement"),
    ];

    for (input, expected) in cases {
        assert_eq!(parse(input).event_name(), expected, "{input:?}");
    }
}

#[test]
fn empty_rule_is_canonical() {
    assert_eq!(parse_optional(None), parse(""));
    assert_eq!(parse(""), TriggerRule::default());
    assert_eq!(parse("").event_name(), "");

    // A bare event name carries nothing else.
    let rule = parse("TestEventName");
    assert_eq!(rule.start_valid_time(), None);
    assert_eq!(rule.end_valid_time(), None);
    assert_eq!(rule.delay(), None);
    assert_eq!(rule.meet_count(), None);
    assert_eq!(rule.prev_meet_count(), None);
    assert_eq!(rule.params().count(), 0);
}

#[test]
fn delay_examples() {
    let cases: Vec<(&str, Option<Duration>)> = vec![
        ("X:Delay=777", Some(Duration::from_secs(777))),
        ("X:Delay=0", Some(Duration::ZERO)),
        ("X:Delay=caca", None),
        ("X:Delay=", None),
        ("X:Delay", None),
        ("X:Delay=-1", None),
        ("X:Delay=1;Delay=bad", Some(Duration::from_secs(1))),
        ("X:Delay=1;Delay=2", Some(Duration::from_secs(2))),
        ("X:delay=5", None),
    ];

    for (input, expected) in cases {
        assert_eq!(parse(input).delay(), expected, "{input:?}");
    }
}

#[test]
fn meet_count_examples() {
    let cases: Vec<(&str, Option<i32>, Option<i32>)> = vec![
        ("X:MeetCount=3", Some(3), None),
        ("X:PrevMeetCount=2", None, Some(2)),
        ("X:MeetCount=-1;PrevMeetCount=-2", Some(-1), Some(-2)),
        ("X:MeetCount=three;PrevMeetCount=", None, None),
        ("X:MeetCount=1.5", None, None),
    ];

    for (input, meet, prev) in cases {
        let rule = parse(input);
        assert_eq!(rule.meet_count(), meet, "{input:?}");
        assert_eq!(rule.prev_meet_count(), prev, "{input:?}");
    }
}

#[test]
fn valid_time_range_examples() {
    // (descriptor, start, end)
    let cases: Vec<(&str, Option<NaiveTime>, Option<NaiveTime>)> = vec![
        ("X:ValidTimeRange=00:33-13:44", hm(0, 33), hm(13, 44)),
        ("X:ValidTimeRange=13:44-09:66", hm(13, 44), None),
        ("X:ValidTimeRange=_-13:44", None, hm(13, 44)),
        ("X:ValidTimeRange=13:44-_", hm(13, 44), None),
        ("X:ValidTimeRange=_-_", None, None),
        ("X:ValidTimeRange=23:00-01:00", hm(23, 0), hm(1, 0)),
        ("X:ValidTimeRange=8:00-9:00", None, None),
        ("X:ValidTimeRange=", None, None),
        ("X:ValidTimeRange", None, None),
        // Empty pieces are dropped, so a lone upper bound lands on start.
        ("X:ValidTimeRange=-13:44", hm(13, 44), None),
        ("X:ValidTimeRange=10:00-11:00-12:00", hm(10, 0), hm(11, 0)),
    ];

    for (input, start, end) in cases {
        let rule = parse(input);
        assert_eq!(rule.start_valid_time(), start, "{input:?}");
        assert_eq!(rule.end_valid_time(), end, "{input:?}");
    }
}

#[test]
fn malformed_input_never_panics() {
    let inputs = [
        "", ":", "::", ";", "=", "-", "|", ":;", ":=", ":;;;", ":===", "X:=", "X:=v", "X:k=", "X:ValidTimeRange=-",
        "X:ValidTimeRange=--", "X:ExceptFoo=", "X:Except=", "X:Delay=99999999999999999999", "\u{0}:\u{0}=\u{0}",
        "ü:ü=ü;ü", "X:MeetCount=+", "X:a=b=c=d",
    ];

    for input in inputs {
        let _ = parse(input);
    }
}

#[test]
fn reserved_keys_are_case_sensitive() {
    let rule = parse("X:validtimerange=00:00-01:00;DELAY=5;meetcount=1");
    assert_eq!(rule.valid_window().start, None);
    assert_eq!(rule.delay(), None);
    assert_eq!(rule.meet_count(), None);
    assert_eq!(rule.get_param_value("validtimerange"), Some("00:00-01:00"));
    assert_eq!(rule.get_param_value("DELAY"), Some("5"));
}

#[test]
fn parameter_parsing() {
    let rule = parse("X:A=1;;B;C=;=D;E=x=y;A=2");
    assert_eq!(rule.get_param_value("A"), Some("2"));
    assert_eq!(rule.get_param_value("B"), Some(""));
    assert_eq!(rule.get_param_value("C"), Some(""));
    assert_eq!(rule.get_param_value("D"), Some(""));
    assert_eq!(rule.get_param_value("E"), Some("x=y"));
    assert_eq!(rule.params().count(), 5);
}

#[test]
fn param_match_and_exclusion_examples() {
    let rule = parse("X:Param1=Val1;Param2=Val2;ExceptParam2=Val1|Val2|Val3");

    // (name, value, expected)
    let cases: Vec<(&str, Option<&str>, bool)> = vec![
        ("Param1", Some("Val1"), true),
        ("Param1", Some("Val2"), false),
        ("Param2", Some("Val4"), false),
        // Matches the stored value but is vetoed by the exclusion list.
        ("Param2", Some("Val2"), false),
        ("Param3", Some("Anything"), true),
        ("Param3", None, true),
    ];

    for (name, value, expected) in cases {
        assert_eq!(rule.has_param_value_or_unset(name, value), expected, "{name}={value:?}");
    }

    assert!(rule.is_excluded("Param2", Some("Val3")));
    assert!(!rule.is_excluded("Param2", Some("Val4")));
    assert!(!rule.is_excluded("Param1", Some("Val1")));
}

#[test]
fn exclusion_wins_over_positive_match() {
    let rule = parse("X:Param1=Val1;ExceptParam1=Val1");
    assert!(!rule.has_param_value_or_unset("Param1", Some("Val1")));
}

#[test]
fn overnight_window_through_rule() {
    let rule = parse("X:ValidTimeRange=23:00-01:00");
    assert!(rule.is_in_valid_time(at(0, 30)));
    assert!(rule.is_in_valid_time(at(23, 15)));
    assert!(!rule.is_in_valid_time(at(12, 0)));
}

#[test]
fn window_checks_through_rule() {
    let rule = parse("X:ValidTimeRange=00:33-13:44");
    assert!(rule.is_in_valid_time(at(0, 33)));
    assert!(rule.is_in_valid_time(at(13, 44)));
    assert!(!rule.is_in_valid_time(at(13, 45)));

    assert!(parse("X").is_in_valid_time(at(3, 0)));
    assert!(parse("X:ValidTimeRange=_-13:44").is_in_valid_time(at(0, 0)));
    assert!(!parse("X:ValidTimeRange=13:44-_").is_in_valid_time(at(0, 0)));
}

#[test]
fn window_check_on_injected_clock() {
    let rule = parse("X:ValidTimeRange=08:00-09:00");
    assert!(rule.is_in_valid_time_on(&crate::FixedClock(at(8, 30))));
    assert!(!rule.is_in_valid_time_on(&crate::FixedClock(at(9, 30))));
}

#[test]
fn permits_composes_window_and_params() {
    let rule = parse("Motion:ValidTimeRange=18:00-23:00;Room=Hall;ExceptMode=Away");
    assert!(rule.permits(at(19, 0), &[("Room", Some("Hall")), ("Mode", Some("Home"))]));
    assert!(!rule.permits(at(12, 0), &[("Room", Some("Hall"))]));
    assert!(!rule.permits(at(19, 0), &[("Room", Some("Kitchen"))]));
    assert!(!rule.permits(at(19, 0), &[("Mode", Some("Away"))]));
    assert!(rule.permits(at(19, 0), &[]));
}
