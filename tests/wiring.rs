use everblu_meter::codegen::{self, BuildContext};
use everblu_meter::config;
use everblu_meter::driver::{EverbluMeterComponent, ReadRequest, SetterLog};

mod stubs;

#[test]
fn test_full_config_wires_every_entity() {
    let config = config::from_str(stubs::config::FULL_PAYLOAD).unwrap();
    let mut ctx = BuildContext::new();
    let mut log = SetterLog::new();
    codegen::to_code(&config, &mut ctx, &mut log);

    // 17 basic setters, one per sensor, two per button
    assert_eq!(log.calls().len(), 17 + 19 + 2 * 2);
    assert_eq!(log.argument("set_update_interval"), Some("never"));
    assert_eq!(log.argument("set_meter_type"), Some("true"));
    assert_eq!(log.argument("set_volume_sensor"), Some("garden_meter_volume"));
    let scan: Vec<String> = log
        .calls_on("garden_meter_frequency_scan_button")
        .map(|c| c.to_string())
        .collect();
    assert_eq!(
        scan,
        vec![
            "garden_meter_frequency_scan_button.set_parent(garden_meter)",
            "garden_meter_frequency_scan_button.set_frequency_scan(true)",
        ]
    );

    let flags = ctx.build_flags();
    assert_eq!(
        flags,
        vec![
            "-DUSE_ESPHOME",
            "-DWIFI_SERIAL_NO_REMAP",
            "-DMETER_YEAR=16",
            "-DMETER_SERIAL=8354291",
            "-DGDO0=5",
            "-DDEBUG_CC1101=1",
        ]
    );
    assert_eq!(ctx.components(), ["garden_meter".to_string()]);
}

#[test]
fn test_minimal_config_setter_order() {
    let config = config::from_str(stubs::config::MINIMAL_PAYLOAD).unwrap();
    let mut log = SetterLog::new();
    codegen::to_code(&config, &mut BuildContext::new(), &mut log);

    let setters: Vec<&str> = log.calls().iter().map(|c| c.setter).collect();
    assert_eq!(setters.first(), Some(&"set_meter_year"));
    assert_eq!(setters.last(), Some(&"set_update_interval"));
    assert_eq!(log.argument("set_update_interval"), Some("86400000"));
    assert_eq!(log.argument("set_meter_type"), Some("false"));
}

#[test]
fn test_component_buttons_request_reads() {
    let config = config::from_str(stubs::config::FULL_PAYLOAD).unwrap();
    let mut component = EverbluMeterComponent::new(config.id.as_str());
    codegen::to_code(&config, &mut BuildContext::new(), &mut component);

    let counts = component.linked_entity_counts();
    assert_eq!((counts.numeric, counts.text, counts.binary), (12, 5, 2));

    let read = component.request_reading_button().cloned().unwrap();
    let scan = component.frequency_scan_button().cloned().unwrap();

    // Presses before setup are dropped
    read.press(&mut component);
    assert_eq!(component.pending_request(), None);

    component.setup();
    read.press(&mut component);
    assert_eq!(component.take_pending_request(), Some(ReadRequest::ManualRead));
    scan.press(&mut component);
    assert_eq!(component.take_pending_request(), Some(ReadRequest::FrequencyScan));
    assert_eq!(component.pending_request(), None);
}

#[test]
fn test_component_summary() {
    let config = config::from_str(stubs::config::FULL_PAYLOAD).unwrap();
    let mut component = EverbluMeterComponent::new(config.id.as_str());
    codegen::to_code(&config, &mut BuildContext::new(), &mut component);

    let summary = component.config_summary();
    assert!(summary.contains(&"  Meter Type: Gas".to_string()));
    assert!(summary.contains(&"  Gas Volume Divisor: 250".to_string()));
    assert!(summary.contains(&"  Timezone Offset: 120".to_string()));
    assert!(summary.contains(&"  Read Time: 06:30".to_string()));
    assert!(summary.contains(&"  Retry Cooldown: 900000 ms".to_string()));
    assert!(summary.contains(&"  Time Component: sntp_time".to_string()));
}
