/*!
 * Tests for the application controller
 */

use anyhow::Result;
use clipchop::app_config::Config;
use clipchop::app_controller::Controller;

/// Test controller creation with default configuration
#[test]
fn test_new_for_test_shouldCreateController() -> Result<()> {
    let _controller = Controller::new_for_test()?;
    Ok(())
}

/// Test controller creation with a custom configuration
#[test]
fn test_with_config_withValidConfig_shouldCreateController() -> Result<()> {
    let mut config = Config::default();
    config.clip.count = 1;
    config.validate()?;

    let _controller = Controller::with_config(config)?;
    Ok(())
}
