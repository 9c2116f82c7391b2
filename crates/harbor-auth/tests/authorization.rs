use async_trait::async_trait;
use harbor_auth::prelude::*;
use harbor_model::prelude::*;
use harbor_types::prelude::*;
use pretty_assertions::assert_eq;

/// realm -> repo -> dockerfile, with a user "alice" and a group "devs".
struct Fixture {
    store: InMemoryAccessStore,
    realm: Resource,
    repo: Resource,
    dockerfile: Resource,
    alice: User,
    token: SessionToken,
}

fn fixture() -> Fixture {
    let store = InMemoryAccessStore::new();
    let realm = store.create_realm("acme", None).unwrap();
    let repo = store.create_repository(realm.id(), "app", None).unwrap();
    let dockerfile = store
        .create_resource(repo.id(), "Dockerfile", None, ResourceKind::dockerfile("/df/1"))
        .unwrap();
    let alice = store
        .create_user(realm.id(), &UserId::new("alice"), "Alice", "hash")
        .unwrap();
    let token = SessionToken::new(SessionId::new("1:ff"), UserId::new("alice"));
    Fixture {
        store,
        realm,
        repo,
        dockerfile,
        alice,
        token,
    }
}

fn mask(permission: Permission) -> PermissionMask {
    PermissionMask::single(permission)
}

#[tokio::test]
async fn user_may_always_act_on_own_account() {
    let f = fixture();
    let engine = AclAuthorizer::new(f.store.clone());
    for permission in Permission::ALL {
        let decision = engine
            .decide(&f.token, &mask(permission), f.alice.id())
            .await
            .unwrap();
        assert!(decision.allow);
        assert_eq!(decision.reason.as_deref(), Some("own-account"));
    }
}

#[tokio::test]
async fn multi_bit_mask_is_an_error() {
    let f = fixture();
    f.store
        .set_access(f.repo.id(), f.alice.id(), PermissionMask::all())
        .unwrap();
    let engine = AclAuthorizer::new(f.store.clone());
    let two = PermissionMask::of(&[Permission::Read, Permission::Write]);
    let err = engine.authorize(&f.token, &two, f.repo.id()).await.unwrap_err();
    assert_eq!(err.code().0, "REQUEST.INVALID_ACTION_MASK");
    assert_eq!(err.http_status(), 400);

    // Multi-bit masks fail even on the caller's own account.
    let err = engine.authorize(&f.token, &two, f.alice.id()).await.unwrap_err();
    assert_eq!(err.code().0, "REQUEST.INVALID_ACTION_MASK");
}

#[tokio::test]
async fn empty_mask_is_denied_not_an_error() {
    let f = fixture();
    f.store
        .set_access(f.repo.id(), f.alice.id(), PermissionMask::all())
        .unwrap();
    let engine = AclAuthorizer::new(f.store.clone());

    assert!(!engine
        .authorize(&f.token, &PermissionMask::none(), f.repo.id())
        .await
        .unwrap());

    let decision = engine
        .decide(&f.token, &PermissionMask::none(), f.repo.id())
        .await
        .unwrap();
    assert_eq!(decision.permission, None);
    assert_eq!(decision.grant, None);
    assert_eq!(decision.reason.as_deref(), Some("no-action-requested"));
}

#[tokio::test]
async fn parent_grant_covers_child_for_granted_bit_only() {
    let f = fixture();
    f.store
        .set_access(f.repo.id(), f.alice.id(), mask(Permission::Read))
        .unwrap();
    let engine = AclAuthorizer::new(f.store.clone());

    let decision = engine
        .decide(&f.token, &mask(Permission::Read), f.dockerfile.id())
        .await
        .unwrap();
    assert!(decision.allow);
    let grant = decision.grant.unwrap();
    assert_eq!(grant.path, GrantPath::Parent);
    assert_eq!(&grant.resource_id, f.repo.id());

    assert!(!engine
        .authorize(&f.token, &mask(Permission::Write), f.dockerfile.id())
        .await
        .unwrap());
}

#[tokio::test]
async fn grandparent_grant_does_not_reach_grandchild() {
    let f = fixture();
    f.store
        .set_access(f.realm.id(), f.alice.id(), PermissionMask::all())
        .unwrap();
    let engine = AclAuthorizer::new(f.store.clone());

    assert!(engine
        .authorize(&f.token, &mask(Permission::Read), f.repo.id())
        .await
        .unwrap());
    assert!(!engine
        .authorize(&f.token, &mask(Permission::Read), f.dockerfile.id())
        .await
        .unwrap());
}

#[tokio::test]
async fn group_grant_is_honoured_for_members() {
    let f = fixture();
    let devs = f.store.create_group(f.realm.id(), "devs", None).unwrap();
    f.store.add_user_to_group(f.alice.id(), devs.id()).unwrap();
    f.store
        .set_access(f.dockerfile.id(), devs.id(), mask(Permission::Delete))
        .unwrap();
    let engine = AclAuthorizer::new(f.store.clone());

    let decision = engine
        .decide(&f.token, &mask(Permission::Delete), f.dockerfile.id())
        .await
        .unwrap();
    assert!(decision.allow);
    let grant = decision.grant.unwrap();
    assert_eq!(&grant.party_id, devs.id());
    assert_eq!(grant.path, GrantPath::Direct);
}

#[tokio::test]
async fn user_grant_wins_before_groups_are_consulted() {
    let f = fixture();
    let devs = f.store.create_group(f.realm.id(), "devs", None).unwrap();
    f.store.add_user_to_group(f.alice.id(), devs.id()).unwrap();
    f.store
        .set_access(f.repo.id(), devs.id(), mask(Permission::Read))
        .unwrap();
    f.store
        .set_access(f.repo.id(), f.alice.id(), mask(Permission::Read))
        .unwrap();
    let engine = AclAuthorizer::new(f.store.clone());

    let decision = engine
        .decide(&f.token, &mask(Permission::Read), f.repo.id())
        .await
        .unwrap();
    assert_eq!(&decision.grant.unwrap().party_id, f.alice.id());
}

#[tokio::test]
async fn capabilities_do_not_imply_each_other() {
    let f = fixture();
    f.store
        .set_access(f.repo.id(), f.alice.id(), mask(Permission::Write))
        .unwrap();
    let engine = AclAuthorizer::new(f.store.clone());
    for permission in Permission::ALL {
        let allowed = engine
            .authorize(&f.token, &mask(permission), f.repo.id())
            .await
            .unwrap();
        assert_eq!(allowed, permission == Permission::Write, "{permission}");
    }
}

#[tokio::test]
async fn no_grant_is_a_plain_denial() {
    let f = fixture();
    let engine = AclAuthorizer::new(f.store.clone());
    let decision = engine
        .decide(&f.token, &mask(Permission::Read), f.repo.id())
        .await
        .unwrap();
    assert!(!decision.allow);
    assert_eq!(decision.reason.as_deref(), Some("no-matching-grant"));
}

#[tokio::test]
async fn unknown_user_is_an_identity_error() {
    let f = fixture();
    let engine = AclAuthorizer::new(f.store.clone());
    let ghost = SessionToken::new(SessionId::new("1:ff"), UserId::new("ghost"));
    let err = engine
        .authorize(&ghost, &mask(Permission::Read), f.repo.id())
        .await
        .unwrap_err();
    assert_eq!(err.code().0, "AUTH.IDENTITY_UNRESOLVED");
    assert_eq!(err.http_status(), 401);
}

#[tokio::test]
async fn unknown_resource_is_not_found_rather_than_denied() {
    let f = fixture();
    let engine = AclAuthorizer::new(f.store.clone());
    let err = engine
        .authorize(&f.token, &mask(Permission::Read), &ObjectId::new("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.code().0, "STORAGE.NOT_FOUND");
    assert_eq!(err.http_status(), 404);
}

/// Wraps the memory store and fails lookups of one id.
struct FlakyStore {
    inner: InMemoryAccessStore,
    broken: ObjectId,
}

impl FlakyStore {
    fn check(&self, id: &ObjectId) -> Result<(), StorageError> {
        if id == &self.broken {
            Err(StorageError::unavailable("backend connection reset"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AccessStore for FlakyStore {
    async fn resource(&self, id: &ObjectId) -> Result<Resource, StorageError> {
        self.check(id)?;
        self.inner.resource(id).await
    }

    async fn party(&self, id: &ObjectId) -> Result<Party, StorageError> {
        self.check(id)?;
        self.inner.party(id).await
    }

    async fn acl_entry(&self, id: &ObjectId) -> Result<AclEntry, StorageError> {
        self.check(id)?;
        self.inner.acl_entry(id).await
    }

    async fn user_by_user_id(&self, user_id: &UserId) -> Result<User, StorageError> {
        self.inner.user_by_user_id(user_id).await
    }
}

#[tokio::test]
async fn storage_failures_propagate_verbatim() {
    let f = fixture();
    let devs = f.store.create_group(f.realm.id(), "devs", None).unwrap();
    f.store.add_user_to_group(f.alice.id(), devs.id()).unwrap();

    let engine = AclAuthorizer::new(FlakyStore {
        inner: f.store.clone(),
        broken: devs.id().clone(),
    });
    let err = engine
        .authorize(&f.token, &mask(Permission::Read), f.repo.id())
        .await
        .unwrap_err();
    let obj = err.into_inner();
    assert_eq!(obj.code.0, "STORAGE.UNAVAILABLE");
    assert_eq!(obj.message_dev.as_deref(), Some("backend connection reset"));
}

#[tokio::test]
async fn unresolvable_parent_is_an_error() {
    let f = fixture();
    let engine = AclAuthorizer::new(FlakyStore {
        inner: f.store.clone(),
        broken: f.repo.id().clone(),
    });
    let err = engine
        .authorize(&f.token, &mask(Permission::Read), f.dockerfile.id())
        .await
        .unwrap_err();
    assert_eq!(err.code().0, "STORAGE.UNAVAILABLE");
}
