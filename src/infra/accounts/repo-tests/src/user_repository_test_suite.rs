// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use dill::Catalog;
use pretty_assertions::assert_eq;
use sigauth_accounts::{CreateUserError, User, UserErrorDuplicate, UserRepository};

use crate::helpers::{reference_time, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_missing_user_not_found(catalog: &Catalog) {
    let user_repo = catalog.get_one::<dyn UserRepository>().unwrap();

    let result = user_repo.find_user_by_wallet(&wallet(1)).await.unwrap();

    assert!(result.is_none());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_and_find_users(catalog: &Catalog) {
    let user_repo = catalog.get_one::<dyn UserRepository>().unwrap();

    let alice = User::new(wallet(1), reference_time());
    let bob = User::new(wallet(2), reference_time());

    user_repo.create_user(&alice).await.unwrap();
    user_repo.create_user(&bob).await.unwrap();

    assert_eq!(
        user_repo.find_user_by_wallet(&wallet(1)).await.unwrap(),
        Some(alice)
    );
    assert_eq!(
        user_repo.find_user_by_wallet(&wallet(2)).await.unwrap(),
        Some(bob)
    );
    assert_eq!(user_repo.find_user_by_wallet(&wallet(3)).await.unwrap(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_user_duplicate_wallet(catalog: &Catalog) {
    let user_repo = catalog.get_one::<dyn UserRepository>().unwrap();

    let first = User::new(wallet(1), reference_time());
    user_repo.create_user(&first).await.unwrap();

    let second = User::new(wallet(1), reference_time());
    assert_matches!(
        user_repo.create_user(&second).await,
        Err(CreateUserError::Duplicate(UserErrorDuplicate { wallet: w })) if w == wallet(1)
    );

    // The first registration wins
    assert_eq!(
        user_repo.find_user_by_wallet(&wallet(1)).await.unwrap(),
        Some(first)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
