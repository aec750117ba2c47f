use serde_json::json;

use crate::common::{TestApp, TestResponse, routes};

mod reading {
    use super::*;
    use everycheese_common::Firmness;

    #[tokio::test]
    async fn list_is_public_and_ordered_by_name() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        app.create_cheese(&token, "Manchego", Firmness::SemiHard, Some("ES"))
            .await;
        app.create_cheese(&token, "Brie", Firmness::Soft, Some("FR"))
            .await;

        let res = app.get_without_token(routes::CHEESES).await;

        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .expect("list should be an array")
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Brie", "Manchego"]);
    }

    #[tokio::test]
    async fn single_cheese_has_display_fields() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        app.create_cheese(&token, "Paski Sir", Firmness::Hard, Some("HR"))
            .await;

        let res = app.get_without_token(&routes::cheese("paski-sir")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["slug"], "paski-sir");
        assert_eq!(res.body["firmness"], "hard");
        assert_eq!(res.body["firmness_display"], "Hard");
        assert_eq!(res.body["country_of_origin"]["name"], "Croatia");
        assert_eq!(res.body["creator"]["username"], "maker");
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::cheese("nope")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn openapi_document_lists_cheese_paths() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::OPENAPI).await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().expect("paths object");
        assert!(paths.keys().any(|p| p.starts_with("/api/v1/cheeses")));
    }
}

mod writing {
    use super::*;

    #[tokio::test]
    async fn create_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::CHEESES, &json!({"name": "Brie"}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
        assert_eq!(app.cheese_count().await, 0);
    }

    #[tokio::test]
    async fn create_assigns_slug_and_creator() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::CHEESES,
                &json!({
                    "name": "Paski Sir",
                    "description": "A salty hard cheese.",
                    "firmness": "hard",
                    "country_of_origin": "hr",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["slug"], "paski-sir");
        assert_eq!(res.body["creator"]["username"], "alice");
        assert_eq!(res.body["country_of_origin"]["code"], "HR");
    }

    #[tokio::test]
    async fn create_without_firmness_is_unspecified() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(routes::CHEESES, &json!({"name": "Mystery"}), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["firmness"], "unspecified");
        assert!(res.body["country_of_origin"].is_null());
    }

    #[tokio::test]
    async fn create_rejects_unknown_firmness_and_country() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let bad_firmness = app
            .post_with_token(
                routes::CHEESES,
                &json!({"name": "Brie", "firmness": "gooey"}),
                &token,
            )
            .await;
        let bad_country = app
            .post_with_token(
                routes::CHEESES,
                &json!({"name": "Brie", "country_of_origin": "ZZ"}),
                &token,
            )
            .await;

        assert_eq!(bad_firmness.status, 400);
        assert_eq!(bad_firmness.body["code"], "VALIDATION_ERROR");
        assert_eq!(bad_country.status, 400);
        assert_eq!(bad_country.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.cheese_count().await, 0);
    }

    #[tokio::test]
    async fn patch_updates_only_given_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let created = app
            .post_with_token(
                routes::CHEESES,
                &json!({"name": "Feta", "description": "Briny.", "firmness": "soft"}),
                &token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);

        let res = app
            .patch_with_token(
                &routes::cheese("feta"),
                &json!({"firmness": "semi-soft", "name": "Ignored"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["firmness"], "semi-soft");
        assert_eq!(res.body["description"], "Briny.");
        assert_eq!(res.body["name"], "Feta");
        assert_eq!(res.body["slug"], "feta");
    }

    #[tokio::test]
    async fn patch_requires_a_token() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let created = app
            .post_with_token(
                routes::CHEESES,
                &json!({"name": "Feta", "description": "Briny.", "firmness": "soft"}),
                &token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);

        let res = app
            .client
            .patch(app.url(&routes::cheese("feta")))
            .json(&json!({"description": "Vandalised"}))
            .send()
            .await
            .expect("Failed to send PATCH request");
        let res = TestResponse::from_response(res).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
        let fetched = app.get_without_token(&routes::cheese("feta")).await;
        assert_eq!(fetched.body["description"], "Briny.");
    }

    #[tokio::test]
    async fn patch_of_unknown_slug_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .patch_with_token(&routes::cheese("nope"), &json!({"description": "x"}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
