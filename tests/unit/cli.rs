use super::*;

#[test]
fn no_arguments_leaves_service_url_unset() {
    let args = CliArgs::parse(Vec::<String>::new()).unwrap();
    assert_eq!(args, CliArgs::default());
}

#[test]
fn service_url_accepts_separate_and_inline_values() {
    let a = CliArgs::parse(["--service-url", "http://a:1"]).unwrap();
    assert_eq!(a.service_url.as_deref(), Some("http://a:1"));

    let b = CliArgs::parse(["--service-url=http://b:2"]).unwrap();
    assert_eq!(b.service_url.as_deref(), Some("http://b:2"));
}

#[test]
fn last_service_url_wins() {
    let args = CliArgs::parse(["--service-url", "http://a", "--service-url=http://b"]).unwrap();
    assert_eq!(args.service_url.as_deref(), Some("http://b"));
}

#[test]
fn missing_value_is_an_error() {
    assert_eq!(
        CliArgs::parse(["--service-url"]),
        Err(CliError::MissingValue("--service-url"))
    );
    assert_eq!(
        CliArgs::parse(["--service-url="]),
        Err(CliError::MissingValue("--service-url"))
    );
}

#[test]
fn unknown_arguments_are_rejected() {
    assert_eq!(
        CliArgs::parse(["--verbose"]),
        Err(CliError::Unknown("--verbose".to_string()))
    );
}
