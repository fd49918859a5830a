#[cfg(test)]
mod sanitize {
    use crate::cache::sanitize;

    #[test]
    fn replaces_spaces() {
        assert_eq!(sanitize("my anime name"), "my_anime_name");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(sanitize("shingeki!? (s2)"), "shingeki_s2");
    }

    #[test]
    fn keeps_hyphens_and_underscores() {
        assert_eq!(sanitize("attack-on-titan_s2"), "attack-on-titan_s2");
    }
}

#[cfg(test)]
mod record {
    use std::collections::HashMap;

    use crate::{
        cache::Record,
        site::{episodes::Episode, metadata::Info},
    };

    fn sample() -> Record {
        let mut episodes = HashMap::new();
        episodes.insert(
            "5".to_owned(),
            Episode {
                episode: 5,
                page_url: "https://web.animerco.org/episodes/show-episode-5".to_owned(),
                embed_url: "https://player.example/embed/5".to_owned(),
                kind: Some("tv".to_owned()),
            },
        );

        Record {
            success: true,
            base_url: "https://web.animerco.org/seasons/show/".to_owned(),
            img_url: None,
            info: Info::Failed {
                error: "media-box not found".to_owned(),
            },
            episodes,
        }
    }

    #[test]
    fn serializes_with_contract_keys() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["success"], true);
        assert!(value["imgUrl"].is_null());
        assert_eq!(value["info"]["error"], "media-box not found");

        let episode = &value["episodes"]["5"];
        assert_eq!(episode["episode"], 5);
        assert_eq!(episode["type"], "tv");
        assert_eq!(episode["embed_url"], "https://player.example/embed/5");
    }

    #[test]
    fn info_details_serialize_untagged() {
        let info = Info::Details {
            genres: vec![],
            content: None,
        };
        let value = serde_json::to_value(info).unwrap();

        assert!(value["genres"].as_array().unwrap().is_empty());
        assert!(value["content"].is_null());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn roundtrips() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();

        assert!(back.success);
        assert_eq!(back.episodes.len(), 1);
        assert_eq!(back.episodes["5"].kind.as_deref(), Some("tv"));
    }
}

#[cfg(test)]
mod store {
    use std::{
        collections::HashMap,
        path::Path,
        time::{Duration, SystemTime, UNIX_EPOCH},
    };

    use crate::{
        cache::{Record, Store},
        site::metadata::Info,
    };

    /// A unique scratch directory per test.
    fn scratch(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        std::env::temp_dir().join(format!("anivault-test-{name}-{nanos}"))
    }

    #[test]
    fn path_is_sanitized_slug() {
        let store = Store::new("cache".into(), Duration::from_secs(1));
        assert_eq!(store.path("my show!"), Path::new("cache/my_show.json"));
    }

    #[test]
    fn missing_file_has_no_age() {
        assert!(Store::age(Path::new("/definitely/not/here.json")).is_none());

        let store = Store::new("cache".into(), Duration::from_secs(1));
        assert!(!store.fresh(Path::new("/definitely/not/here.json")));
    }

    #[tokio::test]
    async fn write_then_fresh() {
        let dir = scratch("fresh");
        let store = Store::new(dir.clone(), Duration::from_secs(60 * 60));

        let record = Record {
            success: true,
            base_url: "https://web.animerco.org/seasons/show/".to_owned(),
            img_url: Some("https://i.ibb.co/abc/bg.jpg".to_owned()),
            info: Info::Details {
                genres: vec![],
                content: None,
            },
            episodes: HashMap::new(),
        };

        let path = store.path("show");
        store.write(&path, &record).await.unwrap();

        // A just-written file is fresh under an hour-long max age,
        // but not under a zero one.
        assert!(store.fresh(&path));
        let strict = Store::new(dir.clone(), Duration::ZERO);
        assert!(!strict.fresh(&path));

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let back: Record = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.img_url.as_deref(), Some("https://i.ibb.co/abc/bg.jpg"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
