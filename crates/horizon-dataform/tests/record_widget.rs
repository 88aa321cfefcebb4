//! Integration tests for record widgets built from derived record types.

use std::sync::Arc;

use horizon_dataform::prelude::*;
use horizon_dataform::widget::downcast;
use horizon_dataform::widget::factory::default_create_widget;
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Choice)]
enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Flags {
    flag: bool,
    count: i32,
}

fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

fn level_to_text(level: u8) -> String {
    level.to_string()
}

fn text_to_level(text: String) -> u8 {
    text.trim().parse().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Everything {
    align: Align,
    maybe_align: Option<Align>,
    enabled: bool,
    maybe_enabled: Option<bool>,
    count: i32,
    maybe_count: Option<i64>,
    ratio: f64,
    maybe_ratio: Option<f64>,
    name: String,
    maybe_name: Option<String>,
    offset: (i64, (bool, Option<u8>)),
    flags: Flags,
    #[field(from_display = fahrenheit_to_celsius, to_display = celsius_to_fahrenheit)]
    temperature: f64,
    #[field(display = String, from_display = text_to_level, to_display = level_to_text)]
    level: u8,
}

fn everything() -> Everything {
    Everything {
        align: Align::Right,
        maybe_align: Some(Align::Center),
        enabled: true,
        maybe_enabled: None,
        count: -12,
        maybe_count: Some(40),
        ratio: 0.25,
        maybe_ratio: None,
        name: "draft".into(),
        maybe_name: Some("backup".into()),
        offset: (7, (true, Some(3))),
        flags: Flags {
            flag: false,
            count: 1,
        },
        temperature: 100.0,
        level: 9,
    }
}

fn collect(widget: &RecordWidget) -> Arc<Mutex<Vec<RecordValue>>> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = received.clone();
    widget
        .data_value_changed()
        .connect(move |record| received_clone.lock().push(record.clone()));
    received
}

fn field<'a, T: DataWidget>(widget: &'a RecordWidget, name: &str) -> &'a T {
    downcast::<T>(widget.widget(name).unwrap()).unwrap()
}

#[test]
fn test_round_trip_every_supported_kind() {
    let widget = RecordWidget::from_record::<Everything>().unwrap();
    widget.set_value(&everything()).unwrap();
    assert_eq!(widget.value::<Everything>().unwrap(), everything());

    let other = Everything {
        maybe_align: None,
        maybe_enabled: Some(false),
        maybe_count: None,
        maybe_ratio: Some(-1.5),
        maybe_name: None,
        offset: (-1, (false, None)),
        ..everything()
    };
    widget.set_value(&other).unwrap();
    assert_eq!(widget.value::<Everything>().unwrap(), other);
}

#[test]
fn test_converters_shape_the_controls() {
    let widget = RecordWidget::from_record::<Everything>().unwrap();
    widget.set_value(&everything()).unwrap();

    let temperature = field::<FloatLineEdit>(&widget, "temperature");
    assert_eq!(temperature.line_edit().text(), "212");

    let level = field::<StrLineEdit>(&widget, "level");
    assert_eq!(level.line_edit().text(), "9");
}

#[test]
fn test_set_data_value_is_silent() {
    let widget = RecordWidget::from_record::<Everything>().unwrap();
    let received = collect(&widget);
    widget.set_value(&everything()).unwrap();
    assert!(received.lock().is_empty());
}

#[derive(Debug, Record)]
struct WithList {
    name: String,
    values: Vec<i32>,
}

#[derive(Debug, Record)]
struct WithOptionalPair {
    pair: Option<(bool, bool)>,
}

#[test]
fn test_unsupported_field_type_fails_construction() {
    assert!(matches!(
        RecordWidget::from_record::<WithList>(),
        Err(DataformError::UnsupportedFieldType { .. })
    ));
    assert!(matches!(
        RecordWidget::from_record::<WithOptionalPair>(),
        Err(DataformError::UnsupportedFieldType { .. })
    ));

    let stack = StackedRecordWidget::new();
    assert!(stack.add_record::<WithList>().is_err());
    assert_eq!(stack.count(), 0);
}

#[test]
fn test_single_edit_notifies_once_with_only_that_field_changed() {
    let widget = RecordWidget::from_record::<Everything>().unwrap();
    widget.set_value(&everything()).unwrap();
    let before = widget.data_value().unwrap();
    let received = collect(&widget);

    field::<EnumComboBox>(&widget, "align").select(0);
    {
        let received = received.lock();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].changed_fields(&before), vec!["align"]);
    }

    let before = widget.data_value().unwrap();
    let count = field::<IntLineEdit>(&widget, "count");
    count.line_edit().clear();
    count.type_text("33");
    assert_eq!(received.lock().len(), 1);
    assert!(count.finish_editing());

    let received = received.lock();
    assert_eq!(received.len(), 2);
    assert_eq!(received[1].changed_fields(&before), vec!["count"]);
    assert_eq!(received[1].get("count"), Some(&Value::Int(33)));
}

#[test]
fn test_nested_tuple_controls() {
    let widget = RecordWidget::from_record::<Everything>().unwrap();
    let offset = field::<TupleGroupBox>(&widget, "offset");
    assert_eq!(offset.children().len(), 2);

    let inner = downcast::<TupleGroupBox>(&offset.children()[1]).unwrap();
    assert_eq!(inner.children().len(), 2);
    assert!(downcast::<BoolCheckBox>(&inner.children()[0]).is_some());
    assert!(downcast::<IntLineEdit>(&inner.children()[1]).unwrap().is_nullable());

    widget.set_value(&everything()).unwrap();
    let received = collect(&widget);
    downcast::<BoolCheckBox>(&inner.children()[0]).unwrap().click();

    let received = received.lock();
    assert_eq!(received.len(), 1);
    let value = Everything::from_record_value(received[0].clone()).unwrap();
    assert_eq!(value.offset, (7, (false, Some(3))));
}

#[test]
fn test_flag_count_example() {
    let widget = RecordWidget::from_record::<Flags>().unwrap();
    widget
        .set_value(&Flags {
            flag: true,
            count: 5,
        })
        .unwrap();
    assert_eq!(
        widget.value::<Flags>().unwrap(),
        Flags {
            flag: true,
            count: 5
        }
    );

    let received = collect(&widget);
    field::<BoolCheckBox>(&widget, "flag").toggle();

    let received = received.lock();
    assert_eq!(received.len(), 1);
    assert_eq!(
        Flags::from_record_value(received[0].clone()).unwrap(),
        Flags {
            flag: false,
            count: 5
        }
    );
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Circle {
    #[field(default = 1.0)]
    radius: f64,
    filled: bool,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Square {
    #[field(default = 2.0)]
    side: f64,
    filled: bool,
}

#[test]
fn test_stacked_index_of_and_forwarding() {
    let stack = StackedRecordWidget::new();
    stack.add_record::<Circle>().unwrap();
    stack.add_record::<Square>().unwrap();

    assert_eq!(stack.index_of_record::<Circle>(), 0);
    assert_eq!(stack.index_of_record::<Square>(), 1);
    assert_eq!(stack.index_of_record::<Flags>(), -1);
    assert!(matches!(
        stack.add_record::<Square>(),
        Err(DataformError::DuplicateRecordType(_))
    ));

    let values = Arc::new(Mutex::new(Vec::new()));
    let values_clone = values.clone();
    stack
        .data_value_changed()
        .connect(move |record| values_clone.lock().push(record.clone()));
    let switches = Arc::new(Mutex::new(Vec::new()));
    let switches_clone = switches.clone();
    stack.current_changed().connect(move |&i| switches_clone.lock().push(i));

    let square = stack.record_widget("Square").unwrap();
    field::<BoolCheckBox>(&square, "filled").click();
    assert!(values.lock().is_empty());

    assert!(stack.set_current_record::<Square>());
    assert!(values.lock().is_empty());
    assert_eq!(*switches.lock(), vec![1]);

    field::<BoolCheckBox>(&square, "filled").click();
    let values = values.lock();
    assert_eq!(values.len(), 1);
    assert_eq!(
        Square::from_record_value(values[0].clone()).unwrap(),
        Square {
            side: 2.0,
            filled: false
        }
    );
}

#[test]
fn test_tab_container_reads_current_record() {
    let tabs = TabRecordWidget::new();
    tabs.add_record::<Circle>("Circle").unwrap();
    tabs.add_record::<Square>("Square").unwrap();
    tabs.set_current_index(1);

    let current = tabs.current_widget().unwrap();
    assert_eq!(current.type_name(), "Square");
    assert_eq!(
        current.value::<Square>().unwrap(),
        Square {
            side: 2.0,
            filled: false
        }
    );
    assert_eq!(tabs.index_of("Triangle"), -1);
}

/// Counts every control it builds and delegates to the standard mapping.
struct CountingFactory {
    config: FormConfig,
    built: Mutex<Vec<String>>,
}

impl WidgetFactory for CountingFactory {
    fn config(&self) -> &FormConfig {
        &self.config
    }

    fn create_widget(&self, field_type: &FieldType) -> horizon_dataform::Result<Arc<dyn DataWidget>> {
        self.built.lock().push(field_type.to_string());
        default_create_widget(self, field_type)
    }
}

#[test]
fn test_custom_factory_applies_at_every_depth() {
    let factory = CountingFactory {
        config: FormConfig::default(),
        built: Mutex::new(Vec::new()),
    };
    RecordWidget::from_schema_with(Flags::schema(), &factory).unwrap();
    assert_eq!(factory.built.lock().len(), 2);

    factory.built.lock().clear();
    let ty = <(bool, (i32, String))>::field_type();
    factory.create_widget(&ty).unwrap();
    // the outer tuple, its two elements and the inner tuple's two elements
    assert_eq!(factory.built.lock().len(), 5);
}

#[test]
fn test_config_controls_float_text() {
    let config = FormConfig::from_toml_str("float_decimals = 2").unwrap();
    let stack = StackedRecordWidget::with_config(config);
    let circle = stack.add_record::<Circle>().unwrap();

    let radius = field::<FloatLineEdit>(&circle, "radius");
    assert_eq!(radius.line_edit().text(), "1.00");
    assert_eq!(circle.value::<Circle>().unwrap().radius, 1.0);
}
