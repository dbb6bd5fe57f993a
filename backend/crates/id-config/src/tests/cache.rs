use crate::Config;
use crate::tests::{EnvGuard, setup_valid_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Cache
// =========================================================================

#[test]
#[serial]
fn given_zero_capacity_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _capacity = EnvGuard::set("ID_CACHE_CAPACITY", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("cache.capacity"));
}

#[test]
#[serial]
fn given_more_shards_than_capacity_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _capacity = EnvGuard::set("ID_CACHE_CAPACITY", "4");
    let _shards = EnvGuard::set("ID_CACHE_SHARDS", "8");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("cache.shards"));
}

#[test]
#[serial]
fn given_zero_shards_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _shards = EnvGuard::set("ID_CACHE_SHARDS", "0");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_zero_ttl_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _ttl = EnvGuard::set("ID_CACHE_TTL_SECS", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("ttl_secs"));
}

#[test]
#[serial]
fn given_eviction_percentage_out_of_range_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _pct = EnvGuard::set("ID_CACHE_EVICTION_PERCENTAGE", "101");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("eviction_percentage"));
}

#[test]
#[serial]
fn given_boundary_cache_values_when_validate_then_ok() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _capacity = EnvGuard::set("ID_CACHE_CAPACITY", "1");
    let _shards = EnvGuard::set("ID_CACHE_SHARDS", "1");
    let _ttl = EnvGuard::set("ID_CACHE_TTL_SECS", "1");
    let _pct = EnvGuard::set("ID_CACHE_EVICTION_PERCENTAGE", "100");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}
