#[cfg(test)]
mod links {
    use std::path::Path;

    use crate::links::{Error, Links};

    #[test]
    fn parses_and_trims() {
        let raw = r#"{"anime_links": [
            " https://web.animerco.org/seasons/a/ ",
            "https://web.animerco.org/seasons/b/",
            "  "
        ]}"#;

        let links = Links::parse(raw).unwrap();
        assert_eq!(
            links.entries,
            vec![
                "https://web.animerco.org/seasons/a/",
                "https://web.animerco.org/seasons/b/",
            ]
        );
    }

    #[test]
    fn empty_list_is_an_error() {
        let result = Links::parse(r#"{"anime_links": []}"#);
        assert!(matches!(result, Err(Error::Empty)));
    }

    #[test]
    fn missing_key_is_an_error() {
        let result = Links::parse("{}");
        assert!(matches!(result, Err(Error::Empty)));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = Links::parse("not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let result = Links::load(Path::new("/definitely/not/here.json")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
