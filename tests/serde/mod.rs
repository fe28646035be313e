use jiff_pattern::{
    DecimalStyle, FormatStyle, Locale, ResolverStyle, SignStyle, TextStyle,
};

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Config {
    resolver: ResolverStyle,
    sign: SignStyle,
    text: TextStyle,
    format: FormatStyle,
    locale: Locale,
    decimal: DecimalStyle,
}

#[test]
fn config() -> anyhow::Result<()> {
    let config = Config {
        resolver: ResolverStyle::Lenient,
        sign: SignStyle::ExceedsPad,
        text: TextStyle::ShortStandalone,
        format: FormatStyle::Medium,
        locale: "en_gb".parse()?,
        decimal: DecimalStyle::STANDARD.with_decimal_separator(','),
    };
    let json = serde_json::to_string(&config)?;
    insta::assert_snapshot!(
        json,
        @r#"{"resolver":"lenient","sign":"exceeds-pad","text":"short-standalone","format":"medium","locale":"en-GB","decimal":"0+-,"}"#,
    );
    let got: Config = serde_json::from_str(&json)?;
    assert_eq!(got, config);
    Ok(())
}

#[test]
fn case_insensitive() -> anyhow::Result<()> {
    let got: ResolverStyle = serde_json::from_str(r#""STRICT""#)?;
    assert_eq!(got, ResolverStyle::Strict);
    Ok(())
}

#[test]
fn errors() {
    let err = serde_json::from_str::<TextStyle>(r#""tiny""#).unwrap_err();
    insta::assert_snapshot!(
        err,
        @"unrecognized text style `tiny` at line 1 column 6",
    );
    let err = serde_json::from_str::<Locale>(r#""en-US-x""#).unwrap_err();
    insta::assert_snapshot!(
        err,
        @"locale `en-US-x` has more than two subtags at line 1 column 9",
    );
    let err = serde_json::from_str::<DecimalStyle>("5").unwrap_err();
    insta::assert_snapshot!(
        err,
        @"invalid type: integer `5`, expected a four character decimal style like `0+-.` at line 1 column 1",
    );
}
