use harbor_model::prelude::*;
use harbor_types::prelude::{ObjectId, UserId};
use pretty_assertions::assert_eq;

fn store_with_repo() -> (InMemoryAccessStore, Resource, Resource) {
    let store = InMemoryAccessStore::new();
    let realm = store.create_realm("acme", Some("Acme Corp".into())).unwrap();
    let repo = store.create_repository(realm.id(), "app", None).unwrap();
    (store, realm, repo)
}

#[tokio::test]
async fn lookups_resolve_created_objects() {
    let (store, realm, repo) = store_with_repo();
    let user = store
        .create_user(realm.id(), &UserId::new("alice"), "Alice", "hash")
        .unwrap();

    let fetched = store.resource(repo.id()).await.unwrap();
    assert_eq!(fetched.parent_id(), Some(realm.id()));
    assert!(fetched.is_repository());

    let by_login = store.user_by_user_id(&UserId::new("alice")).await.unwrap();
    assert_eq!(by_login.id(), user.id());

    let party = store.party(user.id()).await.unwrap();
    assert_eq!(party.realm_id(), realm.id());

    let realm_now = store.resource(realm.id()).await.unwrap();
    match realm_now.kind {
        ResourceKind::Realm(data) => {
            assert_eq!(data.repo_ids, vec![repo.id().clone()]);
            assert_eq!(data.user_ids, vec![user.id().clone()]);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let store = InMemoryAccessStore::new();
    let err = store.resource(&ObjectId::new("nope")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(store.party(&ObjectId::new("nope")).await.unwrap_err().is_not_found());
    assert!(store.acl_entry(&ObjectId::new("nope")).await.unwrap_err().is_not_found());
    assert!(store
        .user_by_user_id(&UserId::new("ghost"))
        .await
        .unwrap_err()
        .is_not_found());
}

#[test]
fn parent_kinds_are_enforced() {
    let (store, realm, repo) = store_with_repo();
    assert!(store
        .create_resource(realm.id(), "Dockerfile", None, ResourceKind::dockerfile("/x"))
        .is_err());
    assert!(store
        .create_resource(repo.id(), "Dockerfile", None, ResourceKind::dockerfile("/x"))
        .is_ok());
    assert!(store
        .create_repository(&ObjectId::new("missing"), "x", None)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn image_names_follow_docker_rules() {
    let (store, _realm, repo) = store_with_repo();
    assert!(store
        .create_resource(repo.id(), "scanner", None, ResourceKind::docker_image(None))
        .is_ok());
    assert!(store
        .create_resource(repo.id(), "acme.scanner", None, ResourceKind::docker_image(None))
        .is_err());
    assert!(store
        .create_resource(repo.id(), "Upper", None, ResourceKind::docker_image(None))
        .is_err());
}

#[tokio::test]
async fn set_access_updates_instead_of_duplicating() {
    let (store, realm, repo) = store_with_repo();
    let user = store
        .create_user(realm.id(), &UserId::new("bob"), "Bob", "hash")
        .unwrap();

    let first = store
        .set_access(repo.id(), user.id(), Permission::Read.into())
        .unwrap();
    let second = store
        .set_access(repo.id(), user.id(), Permission::Write.into())
        .unwrap();
    assert_eq!(first.id, second.id);
    assert!(!second.mask.contains(Permission::Read));
    assert!(second.mask.contains(Permission::Write));

    let merged = store
        .add_access(repo.id(), user.id(), Permission::Delete.into())
        .unwrap();
    assert!(merged.mask.contains(Permission::Write));
    assert!(merged.mask.contains(Permission::Delete));

    let party = store.party(user.id()).await.unwrap();
    assert_eq!(party.acl_entry_ids(), &[first.id.clone()]);
    let resource = store.resource(repo.id()).await.unwrap();
    assert_eq!(resource.acl_entry_ids(), &[first.id.clone()]);

    store.delete_access(repo.id(), user.id()).unwrap();
    assert!(store.acl_entry(&first.id).await.unwrap_err().is_not_found());
    assert!(store.party(user.id()).await.unwrap().acl_entry_ids().is_empty());
    assert!(store.resource(repo.id()).await.unwrap().acl_entry_ids().is_empty());
    assert!(store.delete_access(repo.id(), user.id()).is_err());
}

#[tokio::test]
async fn group_membership_is_kept_on_both_sides() {
    let (store, realm, _repo) = store_with_repo();
    let user = store
        .create_user(realm.id(), &UserId::new("carol"), "Carol", "hash")
        .unwrap();
    let devs = store.create_group(realm.id(), "devs", None).unwrap();
    let ops = store.create_group(realm.id(), "ops", None).unwrap();

    store.add_user_to_group(user.id(), ops.id()).unwrap();
    store.add_user_to_group(user.id(), devs.id()).unwrap();
    store.add_user_to_group(user.id(), devs.id()).unwrap();

    let party = store.party(user.id()).await.unwrap();
    assert_eq!(party.group_ids(), &[ops.id().clone(), devs.id().clone()]);
    let group = store.party(devs.id()).await.unwrap();
    assert_eq!(group.as_group().unwrap().user_ids, vec![user.id().clone()]);

    assert!(store.add_user_to_group(ops.id(), devs.id()).is_err());
}

#[tokio::test]
async fn membership_stays_within_a_realm() {
    let (store, realm, _repo) = store_with_repo();
    let other = store.create_realm("globex", None).unwrap();
    let outsider = store
        .create_user(other.id(), &UserId::new("hank"), "Hank", "hash")
        .unwrap();
    let devs = store.create_group(realm.id(), "devs", None).unwrap();

    let err = store.add_user_to_group(outsider.id(), devs.id()).unwrap_err();
    assert_eq!(err.into_inner().code.0, "SCHEMA.VALIDATION_FAILED");
    assert!(store.party(outsider.id()).await.unwrap().group_ids().is_empty());
    let group = store.party(devs.id()).await.unwrap();
    assert!(group.as_group().unwrap().user_ids.is_empty());
}

#[tokio::test]
async fn duplicate_login_ids_conflict() {
    let (store, realm, _repo) = store_with_repo();
    store
        .create_user(realm.id(), &UserId::new("dave"), "Dave", "h")
        .unwrap();
    let err = store
        .create_user(realm.id(), &UserId::new("dave"), "Dave 2", "h")
        .unwrap_err();
    assert_eq!(err.code().0, "STORAGE.CONFLICT");
}

#[tokio::test]
async fn login_attempts_are_appended() {
    let (store, realm, _repo) = store_with_repo();
    let user = store
        .create_user(realm.id(), &UserId::new("erin"), "Erin", "h")
        .unwrap();
    store
        .record_login_attempt(user.id(), LoginAttempt::now(false))
        .await
        .unwrap();
    store
        .record_login_attempt(user.id(), LoginAttempt::now(true))
        .await
        .unwrap();
    let user = store.user_by_user_id(&UserId::new("erin")).await.unwrap();
    assert_eq!(user.login_attempts.len(), 2);
    assert!(user.login_attempts[1].succeeded);
}
