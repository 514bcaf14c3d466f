use ipmi_integrity::oem;
use ipmi_integrity::{COMPLETION_INVALID_COMMAND, Dispatcher, Error, RawRequest, RawResponse};

#[test]
fn qct_platform_id_is_served() {
    let mut dispatcher = Dispatcher::new();
    oem::register(&mut dispatcher).expect("register");

    let resp = dispatcher.dispatch(&RawRequest::new(
        oem::NETFN_QCT,
        oem::CMD_GET_PLATFORM_ID,
        Vec::new(),
    ));
    assert_eq!(resp, RawResponse::ok(vec![oem::PLATFORM_ID]));
    assert_eq!(resp.to_bytes(), vec![0x00, 0x02]);
}

#[test]
fn qct_module_registers_once() {
    let mut dispatcher = Dispatcher::new();
    oem::register(&mut dispatcher).expect("register");
    assert_eq!(
        oem::register(&mut dispatcher),
        Err(Error::DuplicateHandler {
            netfn: 0x36,
            cmd: 0x65
        })
    );
}

#[test]
fn other_oem_commands_are_invalid() {
    let mut dispatcher = Dispatcher::new();
    oem::register(&mut dispatcher).expect("register");

    let resp = dispatcher.dispatch(&RawRequest::new(oem::NETFN_QCT, 0x66, vec![0x01]));
    assert_eq!(resp.completion_code, COMPLETION_INVALID_COMMAND);
}
