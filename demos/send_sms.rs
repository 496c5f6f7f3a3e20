use std::io;

use popbill::{
    ContactNumber, CorpNum, PopbillClient, SecurityToken, SingleMessage, StaticTokenProvider,
};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = required("POPBILL_TOKEN")?;
    let corp_num = required("POPBILL_CORP_NUM")?;
    let sender = required("POPBILL_SENDER")?;
    let receiver = required("POPBILL_RECEIVER")?;
    let content = std::env::var("POPBILL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the popbill demo.".to_owned());

    let tokens = StaticTokenProvider::new(SecurityToken::new(token)?);
    let client = PopbillClient::builder(tokens).test_mode(true).build()?;

    let corp = CorpNum::new(corp_num)?;
    let message = SingleMessage::new(ContactNumber::new(sender)?, ContactNumber::new(receiver)?, content);
    let receipt = client.message().send_sms(&corp, message, None).await?;
    println!("receipt: {}", receipt.as_str());

    for result in client.message().get_messages(&corp, &receipt, None).await? {
        println!(
            "state: {:?}, receiver: {:?}, result: {:?}",
            result.state, result.receive_num, result.send_result
        );
    }

    Ok(())
}
