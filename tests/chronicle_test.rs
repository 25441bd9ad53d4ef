mod common;

use common::{mock_kuro::MockKuroServer, CN_MISSING_PLAYER, CN_PLAYER};
use kuronet::{ApiErrorKind, ClientConfig, KuroError, McClient, Region};

const REFRESH: &str = "/gamer/roleBox/aki/refreshData";

async fn client(mock: &MockKuroServer) -> McClient {
    common::init_tracing();
    McClient::open(common::cn_config(&mock.base_url))
        .await
        .expect("client should open")
}

#[tokio::test]
async fn notes_are_decrypted_after_refresh() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    let notes = client.chronicle().get_mc_notes(None, None, true).await.unwrap();
    assert_eq!(notes.nickname, "漂泊者");
    assert_eq!(notes.uid, CN_PLAYER);
    assert_eq!(notes.current_stamina, 180);
    assert_eq!(notes.max_stamina, 240);
    assert_eq!(notes.box_list[0].num, 120);

    let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec![REFRESH, "/gamer/roleBox/akiBox/baseData"]);

    let req = &mock.requests_to("/gamer/roleBox/akiBox/baseData")[0];
    assert_eq!(req.form["gameId"], "3");
    assert_eq!(req.form["roleId"], CN_PLAYER.to_string());
    assert_eq!(req.form["serverId"], kuronet::player::MC_CN_SERVER);
}

#[tokio::test]
async fn auto_refresh_can_be_skipped() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    client.chronicle().get_mc_roles(None, None, false).await.unwrap();
    assert!(mock.requests_to(REFRESH).is_empty());
}

#[tokio::test]
async fn refresh_data_reports_success() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    assert!(client.chronicle().refresh_data(None, None).await.unwrap());
}

#[tokio::test]
async fn empty_notes_for_explicit_player_is_account_not_found() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    let err = client
        .chronicle()
        .get_mc_notes(Some(CN_MISSING_PLAYER), None, false)
        .await
        .unwrap_err();
    assert_eq!(err.api_kind(), Some(&ApiErrorKind::AccountNotFound));
}

#[tokio::test]
async fn unencrypted_roles_payload_is_accepted() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    let roles = client.chronicle().get_mc_roles(None, None, true).await.unwrap();
    assert!(roles.show_to_guest);
    assert_eq!(roles.role_list[0].role_name, "忌炎");
}

#[tokio::test]
async fn calabash_and_explorer() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    let calabash = client.chronicle().get_mc_calabash(None, None, false).await.unwrap();
    assert_eq!(calabash.level, 8);
    assert_eq!(calabash.phantom_list[0].phantom.phantom_id, 390080005);

    let explorer = client
        .chronicle()
        .get_mc_explorer(None, 2, None, false)
        .await
        .unwrap();
    assert_eq!(explorer.country_code, 2);
    assert_eq!(explorer.area_info_list[0].item_list[0].progress, 95);

    let req = &mock.requests_to("/gamer/roleBox/akiBox/exploreIndex")[0];
    assert_eq!(req.form["channelId"], "19");
    assert_eq!(req.form["countryCode"], "2");
}

#[tokio::test]
async fn role_detail_found_and_missing() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    let detail = client
        .chronicle()
        .get_mc_role_detail(None, 1404, None, false)
        .await
        .unwrap();
    assert_eq!(detail.role.role_id, 1404);
    assert_eq!(detail.chain_level(), 1);
    assert_eq!(detail.phantom_data.equipped().count(), 0);

    let err = client
        .chronicle()
        .get_mc_role_detail(None, 0, None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, KuroError::Validation(ref m) if m.contains("Role not found")));
}

#[tokio::test]
async fn widget_uses_refresh_endpoint_when_asked() {
    let mock = MockKuroServer::start().await;
    let client = client(&mock).await;

    let refreshed = client
        .chronicle()
        .get_mc_notes_widget(None, None, true)
        .await
        .unwrap();
    assert!(refreshed.has_sign_in);
    assert_eq!(refreshed.current_stamina(), 200);
    assert_eq!(refreshed.max_liveness(), 100);

    let cached = client
        .chronicle()
        .get_mc_notes_widget(None, None, false)
        .await
        .unwrap();
    assert!(!cached.has_sign_in);

    let req = &mock.requests_to("/gamer/widget/game3/refresh")[0];
    assert_eq!(req.form["type"], "2");
    assert_eq!(req.form["sizeType"], "1");
    assert_eq!(mock.requests_to("/gamer/widget/game3/getData").len(), 1);
    assert!(mock.requests_to(REFRESH).is_empty());
}

#[tokio::test]
async fn missing_player_id_fails_before_any_request() {
    let mock = MockKuroServer::start().await;
    let client = McClient::open(
        ClientConfig::new()
            .with_region(Region::Chinese)
            .with_api_base(&mock.base_url),
    )
    .await
    .unwrap();

    let err = client.chronicle().get_mc_notes(None, None, true).await.unwrap_err();
    assert!(matches!(err, KuroError::Validation(_)));

    let err = client
        .chronicle()
        .get_mc_roles(Some(312345678), None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, KuroError::Validation(_)));
    assert!(mock.requests().is_empty());
}
