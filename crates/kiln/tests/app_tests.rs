use std::collections::HashMap;
use std::sync::Arc;

use kiln::config::StoreConfig;
use kiln::validation::rules::{MinLength, Required};
use kiln::*;
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"
[app]
name = "blog"

[routing]
namespace = "app\\controllers"
prefix = "/blog"

[[routing.routes]]
pattern = "/"
action = "Posts::index"
name = "home"

[[routing.routes]]
methods = ["get", "post"]
pattern = "/posts/{id}/"
action = "Posts::show"
name = "post"
middleware = ["auth"]
patterns = { id = "[0-9]+" }

[cache]
default = "redis"

[cache.configurations.redis]
type = "redis"
url = "redis://127.0.0.1"

[i18n]
language = "nb_NO"

[i18n.messages]
"validate.required" = "Feltet %s er påkrevd."
"validate.overrides.fieldnames.title" = "tittel"
"#;

#[test]
fn test_config_to_router() {
    let config = Config::parse(CONFIG).unwrap();
    let router = Router::new(config.routing.build_routes()).unwrap();

    match router.dispatch("POST", "/blog/posts/42/") {
        Dispatch::Found(found) => {
            assert_eq!(found.param("id"), Some("42"));
            assert_eq!(
                found.route.action().as_handler(),
                Some("app\\controllers\\Posts::show")
            );
            assert_eq!(found.route.middleware_list(), ["auth"]);
        }
        other => panic!("expected a match, got {other:?}"),
    }

    assert!(matches!(
        router.dispatch("GET", "/blog/posts/42"),
        Dispatch::Redirect(location) if location == "/blog/posts/42/"
    ));
    assert!(matches!(router.dispatch("GET", "/blog/posts/abc/"), Dispatch::NotFound));
    assert!(matches!(
        router.dispatch("DELETE", "/blog/posts/42/"),
        Dispatch::MethodNotAllowed { .. }
    ));

    let mut params = HashMap::new();
    params.insert("id".to_string(), "7".to_string());
    assert_eq!(router.url_for("post", &params).unwrap(), "/blog/posts/7/");
    assert_eq!(router.url_for("home", &HashMap::new()).unwrap(), "/blog/");
}

#[test]
fn test_config_to_cache_manager() {
    let config = Config::parse(CONFIG).unwrap();
    let manager = CacheManager::from_config(&config.cache).unwrap();

    assert_eq!(manager.default_store(), "redis");
    assert!(matches!(
        manager.store(None).unwrap(),
        StoreConfig::Redis { prefix, .. } if prefix == "kiln:"
    ));
}

#[test]
fn test_config_to_translated_validation() {
    let config = Config::parse(CONFIG).unwrap();
    let validator = Validator::new()
        .with_i18n(Arc::new(config.i18n.catalog()))
        .rule("title", Required)
        .rule("body", MinLength(10));

    let mut input = HashMap::new();
    input.insert("body".to_string(), "too short".to_string());

    let result = validator.validate(&input);
    assert!(result.has_errors());
    assert_eq!(result.get_error("title").unwrap(), "Feltet tittel er påkrevd.");
    // no message configured, the key is returned
    assert_eq!(result.get_error("body").unwrap(), "validate.min_length");
}

struct ReverseSigner;

impl Signer for ReverseSigner {
    fn sign(&self, value: &str) -> String {
        format!("{}|{value}", value.chars().rev().collect::<String>())
    }

    fn validate(&self, signed: &str) -> Option<String> {
        let (signature, value) = signed.split_once('|')?;
        (signature.chars().rev().collect::<String>() == value).then(|| value.to_string())
    }
}

#[test]
fn test_signed_cookies_round_trip() {
    let signer: Arc<dyn Signer> = Arc::new(ReverseSigner);
    let mut cookies = Cookies::from_header("session=cba|abc; forged=xxx|abc", Some(signer));

    assert_eq!(cookies.get_signed("session").unwrap(), Some("abc".to_string()));
    assert_eq!(cookies.get_signed("forged").unwrap(), None);

    cookies.add_signed("user", "42").unwrap();
    assert_eq!(cookies.get("user"), Some("24|42"));
    assert_eq!(cookies.get_signed("user").unwrap(), Some("42".to_string()));
}
