use everycheese_common::Firmness;
use everycheese_server::store::CheeseStore;

use crate::common::{TestApp, routes};

mod list_and_detail {
    use super::*;

    #[tokio::test]
    async fn home_redirects_to_the_list() {
        let app = TestApp::spawn().await;

        let res = app.get_page(routes::HOME, None).await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(routes::CHEESE_LIST));
    }

    #[tokio::test]
    async fn list_shows_every_cheese_by_name() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        app.create_cheese(&token, "Stilton", Firmness::SemiHard, Some("GB"))
            .await;
        app.create_cheese(&token, "Brie", Firmness::Soft, Some("FR"))
            .await;

        let res = app.get_page(routes::CHEESE_LIST, None).await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Cheese List"));
        let brie = res.text.find("Brie").expect("Brie should be listed");
        let stilton = res.text.find("Stilton").expect("Stilton should be listed");
        assert!(brie < stilton);
        assert!(res.text.contains("href=\"/cheeses/brie/\""));
    }

    #[tokio::test]
    async fn add_link_is_only_shown_when_logged_in() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let anonymous = app.get_page(routes::CHEESE_LIST, None).await;
        let logged_in = app.get_page(routes::CHEESE_LIST, Some(&token)).await;

        assert!(!anonymous.text.contains("href=\"/cheeses/add/\""));
        assert!(logged_in.text.contains("href=\"/cheeses/add/\""));
    }

    #[tokio::test]
    async fn detail_shows_the_cheese() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        let cheese = app
            .create_cheese(&token, "Paski Sir", Firmness::Hard, Some("HR"))
            .await;

        let res = app.get_page(&routes::cheese_detail(&cheese.slug), None).await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Paski Sir"));
        assert!(res.text.contains("Firmness: Hard"));
        assert!(res.text.contains("Croatia"));
        assert!(res.text.contains("Paski Sir is a tasty cheese."));
        assert!(res.text.contains("maker"));
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_page(&routes::cheese_detail("no-such-cheese"), None).await;

        assert_eq!(res.status, 404);
        assert!(res.text.contains("not found"));
    }
}

mod add {
    use super::*;

    #[tokio::test]
    async fn form_is_shown_to_logged_in_users() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let res = app.get_page(routes::CHEESE_ADD, Some(&token)).await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Add Cheese"));
        assert!(res.text.contains("name=\"name\""));
        assert!(res.text.contains("<option value=\"HR\">Croatia</option>"));
    }

    #[tokio::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let app = TestApp::spawn().await;

        let res = app.get_page(routes::CHEESE_ADD, None).await;

        assert_eq!(res.status, 303);
        let location = res.location.expect("redirect should have a location");
        assert!(location.starts_with(routes::LOGIN_PAGE));
        assert!(location.contains("next="));
    }

    #[tokio::test]
    async fn anonymous_submission_creates_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::CHEESE_ADD,
                &[("name", "Sneaky"), ("firmness", "soft")],
                None,
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(app.cheese_count().await, 0);
    }

    #[tokio::test]
    async fn valid_submission_creates_and_redirects_to_detail() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let res = app
            .post_form(
                routes::CHEESE_ADD,
                &[
                    ("name", "Paski Sir"),
                    ("description", "A salty hard cheese."),
                    ("firmness", "hard"),
                    ("country_of_origin", "HR"),
                ],
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 303, "{}", res.text);
        assert_eq!(res.location.as_deref(), Some("/cheeses/paski-sir/"));

        let cheese = app.cheeses.get_by_slug("paski-sir").await.unwrap();
        assert_eq!(cheese.name, "Paski Sir");
        assert_eq!(cheese.firmness, Firmness::Hard);
        assert_eq!(cheese.creator.username, "maker");
        assert_eq!(cheese.country.map(|c| c.name).as_deref(), Some("Croatia"));
    }

    #[tokio::test]
    async fn duplicate_names_get_numbered_slugs() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        let form = [("name", "Gouda"), ("firmness", "semi-hard")];

        let first = app.post_form(routes::CHEESE_ADD, &form, Some(&token)).await;
        let second = app.post_form(routes::CHEESE_ADD, &form, Some(&token)).await;

        assert_eq!(first.location.as_deref(), Some("/cheeses/gouda/"));
        assert_eq!(second.location.as_deref(), Some("/cheeses/gouda-2/"));
        assert_eq!(app.cheese_count().await, 2);
    }

    #[tokio::test]
    async fn accented_names_get_ascii_slugs() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let res = app
            .post_form(
                routes::CHEESE_ADD,
                &[("name", "Comté"), ("firmness", "hard"), ("country_of_origin", "FR")],
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 303, "{}", res.text);
        assert_eq!(res.location.as_deref(), Some("/cheeses/comte/"));
        let detail = app.get_page("/cheeses/comte/", None).await;
        assert!(detail.text.contains("Comté"));
    }

    #[tokio::test]
    async fn invalid_firmness_redisplays_the_form() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let res = app
            .post_form(
                routes::CHEESE_ADD,
                &[("name", "Runny"), ("firmness", "liquid")],
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("Add Cheese"));
        assert!(res.text.contains("value=\"Runny\""));
        assert!(res.text.contains("liquid is not one of the available choices"));
        assert_eq!(app.cheese_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_country_redisplays_the_form() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let res = app
            .post_form(
                routes::CHEESE_ADD,
                &[
                    ("name", "Mystery"),
                    ("firmness", "soft"),
                    ("country_of_origin", "ZZ"),
                ],
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("ZZ is not one of the available choices"));
        assert_eq!(app.cheese_count().await, 0);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let res = app
            .post_form(
                routes::CHEESE_ADD,
                &[("name", "   "), ("firmness", "soft")],
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.cheese_count().await, 0);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn form_is_prefilled() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        let cheese = app
            .create_cheese(&token, "Feta", Firmness::Soft, Some("GR"))
            .await;

        let res = app
            .get_page(&routes::cheese_update(&cheese.slug), Some(&token))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Update Cheese"));
        assert!(res.text.contains("Feta is a tasty cheese."));
        assert!(res.text.contains("<option value=\"soft\" selected>Soft</option>"));
    }

    #[tokio::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        let cheese = app.create_cheese(&token, "Feta", Firmness::Soft, None).await;

        let res = app.get_page(&routes::cheese_update(&cheese.slug), None).await;

        assert_eq!(res.status, 303);
        assert!(
            res.location
                .as_deref()
                .is_some_and(|l| l.starts_with(routes::LOGIN_PAGE))
        );
    }

    #[tokio::test]
    async fn anonymous_submission_changes_nothing() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        let cheese = app.create_cheese(&token, "Feta", Firmness::Soft, None).await;

        let res = app
            .post_form(
                &routes::cheese_update(&cheese.slug),
                &[("description", "Vandalised"), ("firmness", "hard")],
                None,
            )
            .await;

        assert_eq!(res.status, 303);
        assert!(
            res.location
                .as_deref()
                .is_some_and(|l| l.starts_with(routes::LOGIN_PAGE))
        );
        let unchanged = app.cheeses.get_by_slug("feta").await.unwrap();
        assert_eq!(unchanged.description, cheese.description);
        assert_eq!(unchanged.firmness, Firmness::Soft);
    }

    #[tokio::test]
    async fn submission_changes_description_and_firmness_only() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        let cheese = app
            .create_cheese(&token, "Feta", Firmness::Soft, Some("GR"))
            .await;
        let editor = app.force_login("editor").await;

        let res = app
            .post_form(
                &routes::cheese_update(&cheese.slug),
                &[
                    ("name", "Renamed"),
                    ("description", "Something new"),
                    ("firmness", "semi-soft"),
                ],
                Some(&editor),
            )
            .await;

        assert_eq!(res.status, 303, "{}", res.text);
        assert_eq!(res.location.as_deref(), Some("/cheeses/feta/"));

        let updated = app.cheeses.get_by_slug("feta").await.unwrap();
        assert_eq!(updated.description, "Something new");
        assert_eq!(updated.firmness, Firmness::SemiSoft);
        assert_eq!(updated.name, "Feta");
        assert_eq!(updated.slug, cheese.slug);
        assert_eq!(updated.creator, cheese.creator);
        assert_eq!(updated.country, cheese.country);
    }

    #[tokio::test]
    async fn invalid_firmness_leaves_the_cheese_unchanged() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;
        let cheese = app.create_cheese(&token, "Feta", Firmness::Soft, None).await;

        let res = app
            .post_form(
                &routes::cheese_update(&cheese.slug),
                &[("description", "Changed"), ("firmness", "")],
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.text.contains("This field is required."));
        let unchanged = app.cheeses.get_by_slug("feta").await.unwrap();
        assert_eq!(unchanged.description, cheese.description);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.force_login("maker").await;

        let res = app
            .post_form(
                &routes::cheese_update("no-such-cheese"),
                &[("description", "x"), ("firmness", "soft")],
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}
