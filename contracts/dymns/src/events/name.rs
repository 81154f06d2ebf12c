use near_sdk::AccountId;

use super::builder::EventBuilder;
use super::{ADMIN, ALIAS, NAME};

// --- Dym-Name lifecycle ---

pub(crate) fn emit_dym_name_registered(
    owner_id: &AccountId,
    name: &str,
    expire_at: u64,
    cost: u128,
) {
    EventBuilder::new(NAME, "register", owner_id)
        .field("name", name)
        .field("expire_at", expire_at)
        .field("cost", cost)
        .emit();
}

pub(crate) fn emit_dym_name_renewed(owner_id: &AccountId, name: &str, expire_at: u64, cost: u128) {
    EventBuilder::new(NAME, "renew", owner_id)
        .field("name", name)
        .field("expire_at", expire_at)
        .field("cost", cost)
        .emit();
}

pub(crate) fn emit_dym_name_pruned(author: &AccountId, name: &str) {
    EventBuilder::new(NAME, "prune", author)
        .field("name", name)
        .emit();
}

pub(crate) fn emit_dym_name_transferred(
    old_owner: &AccountId,
    new_owner: &AccountId,
    name: &str,
) {
    EventBuilder::new(NAME, "transfer", old_owner)
        .field("name", name)
        .field("new_owner", new_owner)
        .emit();
}

pub(crate) fn emit_controller_changed(owner_id: &AccountId, name: &str, controller: &AccountId) {
    EventBuilder::new(NAME, "set_controller", owner_id)
        .field("name", name)
        .field("controller", controller)
        .emit();
}

pub(crate) fn emit_resolve_address_updated(
    controller: &AccountId,
    name: &str,
    chain_id: &str,
    sub_name: &str,
    resolve_to: &str,
) {
    EventBuilder::new(NAME, "update_resolve_address", controller)
        .field("name", name)
        .field("chain_id", chain_id)
        .field("sub_name", sub_name)
        .field("resolve_to", resolve_to)
        .emit();
}

// --- Alias registry ---

pub(crate) fn emit_alias_set(author: &AccountId, rollapp_id: &str, alias: &str) {
    EventBuilder::new(ALIAS, "set", author)
        .field("rollapp_id", rollapp_id)
        .field("alias", alias)
        .emit();
}

pub(crate) fn emit_alias_removed(author: &AccountId, rollapp_id: &str, alias: &str) {
    EventBuilder::new(ALIAS, "remove", author)
        .field("rollapp_id", rollapp_id)
        .field("alias", alias)
        .emit();
}

pub(crate) fn emit_alias_moved(
    author: &AccountId,
    alias: &str,
    src_rollapp_id: &str,
    dst_rollapp_id: &str,
) {
    EventBuilder::new(ALIAS, "move", author)
        .field("alias", alias)
        .field("src_rollapp_id", src_rollapp_id)
        .field("dst_rollapp_id", dst_rollapp_id)
        .emit();
}

// --- Admin ---

pub(crate) fn emit_roll_app_registered(author: &AccountId, rollapp_id: &str, creator: &AccountId) {
    EventBuilder::new(ADMIN, "register_roll_app", author)
        .field("rollapp_id", rollapp_id)
        .field("creator", creator)
        .emit();
}

pub(crate) fn emit_params_updated(author: &AccountId) {
    EventBuilder::new(ADMIN, "update_params", author).emit();
}

pub(crate) fn emit_owner_transferred(old_owner: &AccountId, new_owner: &AccountId) {
    EventBuilder::new(ADMIN, "transfer_ownership", old_owner)
        .field("new_owner", new_owner)
        .emit();
}

pub(crate) fn emit_scheduler_changed(author: &AccountId, scheduler: &AccountId) {
    EventBuilder::new(ADMIN, "set_epoch_scheduler", author)
        .field("scheduler", scheduler)
        .emit();
}
