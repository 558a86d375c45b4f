use serde_json::json;

use super::action_test::acks;
use super::action_test::connected_emitter;
use super::*;
use crate::Tag;
use crate::Validator;

#[tokio::test]
async fn get_tags_replaces_cached_table() {
    let state = State::new();
    state.set_tag(Tag::new(99, "stale", "#000000")).unwrap();
    let mut emitter = connected_emitter(&state);
    acks(
        &mut emitter,
        "getTags",
        json!([{
            "ok": true,
            "tags": [
                {"id": 2, "name": "dev", "color": "#0000ff"},
                {"id": "1", "name": "prod", "color": "#ff0000"},
            ],
        }]),
    );

    let tags = get_tags(&emitter).await.unwrap();

    assert_eq!(tags.len(), 2);
    let cached = state.tags().unwrap();
    assert_eq!(cached.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(state.tag(99).is_err());
}

#[tokio::test]
async fn add_tag_caches_server_assigned_id() {
    let state = State::new();
    let mut emitter = connected_emitter(&state);
    emitter
        .expect_emit()
        .withf(|event, _, args| {
            event == "addTag" && *args == [json!({"new": true, "name": "prod", "color": "#ff0000"})]
        })
        .times(1)
        .returning(|_, _, _| Ok(json!([{"ok": true, "tag": {"id": 5, "name": "prod", "color": "#ff0000"}}])));

    let tag = add_tag(&emitter, &Validator::new(), "prod", "#ff0000").await.unwrap();

    assert_eq!(tag, Tag::new(5, "prod", "#ff0000"));
    assert_eq!(state.tag(5).unwrap(), tag);
}

#[tokio::test]
async fn invalid_tag_is_never_sent() {
    let state = State::new();
    let mut emitter = connected_emitter(&state);
    emitter.expect_emit().never();

    let err = add_tag(&emitter, &Validator::new(), "prod", "red").await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(state.tags().unwrap().is_empty());
}

#[tokio::test]
async fn edit_tag_replaces_cached_entry() {
    let state = State::new();
    state.set_tag(Tag::new(5, "prod", "#ff0000")).unwrap();
    let mut emitter = connected_emitter(&state);
    emitter
        .expect_emit()
        .withf(|event, _, args| event == "editTag" && *args == [json!({"id": 5, "name": "live", "color": "#00ff00"})])
        .times(1)
        .returning(|_, _, _| Ok(json!([{"ok": true, "tag": {"id": 5, "name": "live", "color": "#00ff00"}}])));

    edit_tag(&emitter, &Validator::new(), &Tag::new(5, "live", "#00ff00"))
        .await
        .unwrap();

    assert_eq!(state.tag(5).unwrap().name, "live");
}

#[tokio::test]
async fn rejected_delete_keeps_cache() {
    let state = State::new();
    state.set_tag(Tag::new(5, "prod", "#ff0000")).unwrap();
    let mut emitter = connected_emitter(&state);
    acks(&mut emitter, "deleteTag", json!([{"ok": false, "msg": "in use"}]));

    let err = delete_tag(&emitter, 5).await.unwrap_err();

    assert!(matches!(err, Error::Action(ActionError::Failed { action: "deleteTag", .. })));
    assert!(state.tag(5).is_ok());
}

#[tokio::test]
async fn delete_tag_removes_cached_entry() {
    let state = State::new();
    state.set_tag(Tag::new(5, "prod", "#ff0000")).unwrap();
    let mut emitter = connected_emitter(&state);
    acks(&mut emitter, "deleteTag", json!([{"ok": true}]));

    delete_tag(&emitter, 5).await.unwrap();

    assert!(state.tags().unwrap().is_empty());
}
