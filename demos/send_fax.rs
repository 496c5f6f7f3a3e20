use std::io;
use std::path::PathBuf;

use popbill::{
    ContactNumber, CorpNum, FaxReceiver, PopbillClient, SecurityToken, StaticTokenProvider,
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
    let receiver = required("POPBILL_FAX_RECEIVER")?;
    let files_raw = required("POPBILL_FAX_FILES")?;

    let files: Vec<PathBuf> = files_raw.split(',').map(PathBuf::from).collect();

    let tokens = StaticTokenProvider::new(SecurityToken::new(token)?);
    let client = PopbillClient::builder(tokens).test_mode(true).build()?;
    let fax = client.fax();

    let corp = CorpNum::new(corp_num)?;
    let receipt = fax
        .send_fax(
            &corp,
            &ContactNumber::new(sender)?,
            FaxReceiver::new(ContactNumber::new(receiver)?),
            files,
            None,
            None,
        )
        .await?;
    println!("receipt: {}", receipt.as_str());

    for result in fax.get_fax_result(&corp, &receipt, None).await? {
        println!(
            "state: {:?}, pages: {:?}, result: {:?}",
            result.send_state, result.send_page_cnt, result.send_result
        );
    }

    Ok(())
}
