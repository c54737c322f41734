use clap::Parser;
use spaceship_infinity::options::*;

fn parse(args: &[&str]) -> Options {
    let mut argv = vec!["spaceship-infinity"];
    argv.extend_from_slice(args);
    Options::try_parse_from(argv).unwrap()
}

#[test]
fn defaults_match_the_command_line_defaults() {
    assert_eq!(parse(&[]), Options::default());
    let o = Options::default();
    assert_eq!((o.height, o.width, o.difficulty), (15, 30, 1));
    assert_eq!((o.bonus, o.malus), (1000, -1000));
    assert!(o.pretty);
    assert!(!o.still && !o.debug);
    assert_eq!(o.constant_delay, None);
    assert_eq!(o.ammo, None);
}

#[test]
fn parses_every_flag() {
    let o = parse(&[
        "--height", "12", "--width", "40", "--difficulty", "-2", "--constant-delay", "0.5",
        "--ammo", "3", "--bonus", "50", "--malus", "-70", "--still", "--debug", "--pretty",
        "false",
    ]);
    assert_eq!(o.height, 12);
    assert_eq!(o.width, 40);
    assert_eq!(o.difficulty, -2);
    assert_eq!(o.constant_delay, Some(0.5));
    assert_eq!(o.ammo, Some(3));
    assert_eq!(o.bonus, 50);
    assert_eq!(o.malus, -70);
    assert!(o.still);
    assert!(o.debug);
    assert!(!o.pretty);
}

#[test]
fn world_size_is_clamped() {
    let o = parse(&["--width", "200", "--height", "2"]).normalized();
    assert_eq!(o.width, MAX_WIDTH);
    assert_eq!(o.height, MIN_HEIGHT);

    let o = parse(&["--width", "3", "--height", "500"]).normalized();
    assert_eq!(o.width, MIN_WIDTH);
    assert_eq!(o.height, MAX_HEIGHT);
}

#[test]
fn validate_rejects_bad_delay_and_ammo() {
    let ok = Options {
        constant_delay: Some(0.5),
        ..Options::default()
    };
    assert!(ok.validate().is_ok());
    for delay in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let bad = Options {
            constant_delay: Some(delay),
            ..Options::default()
        };
        assert!(bad.validate().is_err(), "delay {}", delay);
    }
    let no_ammo = Options {
        ammo: Some(0),
        ..Options::default()
    };
    assert!(no_ammo.validate().is_err());
}

#[test]
fn starting_ammo_defaults_from_difficulty() {
    let with = |difficulty| Options {
        difficulty,
        ..Options::default()
    };
    assert_eq!(with(1).starting_ammo(), 4);
    assert_eq!(with(4).starting_ammo(), 1);
    assert_eq!(with(10).starting_ammo(), 1);
    assert_eq!(with(-3).starting_ammo(), 8);
    let custom = Options {
        ammo: Some(3),
        ..with(1)
    };
    assert_eq!(custom.starting_ammo(), 3);
}

#[test]
fn malformed_command_lines_are_usage_errors() {
    use clap::error::ErrorKind;

    for argv in [
        vec!["spaceship-infinity", "--bogus"],
        vec!["spaceship-infinity", "--width"],
        vec!["spaceship-infinity", "--height", "tall"],
    ] {
        let err = Options::try_parse_from(argv).unwrap_err();
        assert!(!matches!(
            err.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
        ));
    }
    let help = Options::try_parse_from(["spaceship-infinity", "--help"]).unwrap_err();
    assert_eq!(help.kind(), ErrorKind::DisplayHelp);
}
