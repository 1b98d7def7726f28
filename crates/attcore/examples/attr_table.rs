//! Example building an attribute table and serving reads from it
//!
//! Assembles the attribute layout of a minimal GATT server (a Generic
//! Access service with a device name characteristic). Prints the table,
//! then answers a few requests the way a dispatcher would.

use attcore::att::{dump_attributes, log_attributes, ATT_DEFAULT_MTU};
use attcore::{
    AttributeValue, CancellationToken, ErrorCode, RangeBuilder, ResponseWriter, Uuid, ValueHandler,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Assemble a Generic Access service. The service declaration opens a
    // group covering its characteristic.
    let mut builder = RangeBuilder::new(0x0001);
    let service = builder.push(Uuid::from_u16(0x2800), vec![0x00, 0x18])?;
    let declaration = builder.push(
        Uuid::from_u16(0x2803),
        // read-only, value at 0x0003, type 0x2A00
        vec![0x02, 0x03, 0x00, 0x00, 0x2A],
    )?;
    let device_name = builder.push(
        Uuid::from_u16(0x2A00),
        AttributeValue::dynamic(
            |ctx: &CancellationToken,
             _req: &[u8],
             rsp: &mut ResponseWriter|
             -> Result<(), ErrorCode> {
                if ctx.is_cancelled() {
                    return Err(ErrorCode::Unlikely);
                }
                rsp.write(b"attcore demo").map_err(|e| e.to_error_code())?;
                Ok(())
            },
        ),
    )?;
    builder.end_group(service)?;
    let table = builder.build();

    if let Some(last) = table.last_handle() {
        println!(
            "built {} attributes at {:#06x}..={:#06x}",
            table.len(),
            table.base(),
            last
        );
    }

    let mut rendered = String::new();
    dump_attributes(table.attributes(), &mut rendered)?;
    print!("{rendered}");
    log_attributes(table.attributes());

    // Serve a read of the device name, bounded by the default MTU.
    let ctx = CancellationToken::new();
    let mut rsp = ResponseWriter::new(usize::from(ATT_DEFAULT_MTU) - 1);
    let attr = table.at(device_name).ok_or("device name not in table")?;
    if let Some(handler) = attr.handler() {
        handler
            .handle(&ctx, &[], &mut rsp)
            .map_err(|code| format!("read failed: {code:?}"))?;
    }
    println!(
        "read {:#06x} -> {:?}",
        device_name,
        String::from_utf8_lossy(rsp.as_slice())
    );

    // A discovery request walks an inclusive handle window.
    for attr in table.subrange(declaration, 0xFFFF) {
        println!("discovered {:#06x} type {}", attr.handle, attr.attr_type);
    }

    // A chunk that cannot fit is refused whole.
    let mut tiny = ResponseWriter::new(4);
    if let Err(err) = tiny.write(b"attcore demo") {
        println!("truncated: {err}");
    }

    Ok(())
}
