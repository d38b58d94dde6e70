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
use sigauth_accounts::{ApiKey, ApiKeyRepository, SaveApiKeyError};

use crate::helpers::{reference_time, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_api_key(catalog: &Catalog) {
    let api_key_repo = catalog.get_one::<dyn ApiKeyRepository>().unwrap();

    let api_key = ApiKey {
        key: "api-key-1".to_string(),
        wallet_address: wallet(1),
        created_at: reference_time(),
    };
    api_key_repo.save_api_key(&api_key).await.unwrap();

    assert_eq!(
        api_key_repo.find_api_key(&wallet(1), "api-key-1").await.unwrap(),
        Some(api_key)
    );
    assert_eq!(
        api_key_repo.find_api_key(&wallet(2), "api-key-1").await.unwrap(),
        None
    );
    assert_eq!(
        api_key_repo.find_api_key(&wallet(1), "api-key-2").await.unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_duplicate_api_key(catalog: &Catalog) {
    let api_key_repo = catalog.get_one::<dyn ApiKeyRepository>().unwrap();

    let make_api_key = |seed| ApiKey {
        key: "api-key-1".to_string(),
        wallet_address: wallet(seed),
        created_at: reference_time(),
    };

    api_key_repo.save_api_key(&make_api_key(1)).await.unwrap();

    assert_matches!(
        api_key_repo.save_api_key(&make_api_key(2)).await,
        Err(SaveApiKeyError::Duplicate(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
