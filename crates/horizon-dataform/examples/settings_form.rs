//! Horizon Dataform Settings Form Example
//!
//! Builds forms from two record types, drives the controls the way a user
//! would and prints the records the forms emit:
//! - a record widget with a choice, a converted float and a nested tuple
//! - a tab container holding one record widget per type
//!
//! Run with: cargo run -p horizon-dataform --example settings_form
//! Set `RUST_LOG=horizon_dataform=debug` to see widget construction.

use horizon_dataform::prelude::*;
use horizon_dataform::widget::downcast;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Choice)]
enum Theme {
    Light,
    Dark,
    #[choice(label = "Follow system")]
    System,
}

fn ratio_to_percent(ratio: f64) -> i32 {
    (ratio * 100.0).round() as i32
}

fn percent_to_ratio(percent: i32) -> f64 {
    f64::from(percent) / 100.0
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(name = "Appearance")]
struct Appearance {
    theme: Theme,
    #[field(
        default = 0.8,
        display = i32,
        from_display = percent_to_ratio,
        to_display = ratio_to_percent
    )]
    opacity: f64,
    window_size: (u16, u16),
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Network {
    #[field(default = "localhost")]
    host: String,
    #[field(default = 8080)]
    port: u16,
    proxy: Option<String>,
}

fn main() -> horizon_dataform::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let appearance = RecordWidget::from_record::<Appearance>()?;
    appearance.data_value_changed().connect(|record| {
        println!("appearance changed: {record}");
    });

    appearance.set_value(&Appearance {
        theme: Theme::Light,
        opacity: 0.5,
        window_size: (800, 600),
    })?;
    println!("initial: {:?}", appearance.value::<Appearance>()?);

    if let Some(theme) = appearance.widget("theme")
        && let Some(combo) = downcast::<EnumComboBox>(theme)
    {
        combo.select(2);
    }

    if let Some(opacity) = appearance.widget("opacity")
        && let Some(edit) = downcast::<IntLineEdit>(opacity)
    {
        edit.line_edit().clear();
        edit.type_text("75");
        edit.finish_editing();
    }
    println!("edited: {:?}", appearance.value::<Appearance>()?);

    let tabs = TabRecordWidget::new();
    tabs.add_record::<Network>("Network")?;
    tabs.add_tab(appearance, "Appearance")?;
    tabs.current_changed().connect(|&index| println!("switched to tab {index}"));
    tabs.data_value_changed().connect(|record| {
        println!("current tab changed: {record}");
    });

    tabs.set_current_record::<Network>();
    if let Some(network) = tabs.current_widget() {
        network.set_field_value("port", Value::Int(9000))?;
        println!("network: {:?}", network.value::<Network>()?);
    }

    for index in 0..tabs.count() {
        if let Some(label) = tabs.tab_text(index) {
            println!("tab {index}: {label}");
        }
    }
    Ok(())
}
