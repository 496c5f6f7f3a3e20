use std::io;

use popbill::{Cashbill, CorpNum, MgtKey, PopbillClient, SecurityToken, StaticTokenProvider};

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
    let mgt_key = required("POPBILL_MGT_KEY")?;
    let identity_num = required("POPBILL_IDENTITY_NUM")?;

    let tokens = StaticTokenProvider::new(SecurityToken::new(token)?);
    let client = PopbillClient::builder(tokens).test_mode(true).build()?;
    let cashbill = client.cashbill();

    let corp = CorpNum::new(corp_num)?;
    let key = MgtKey::new(mgt_key)?;
    if cashbill.check_mgt_key_in_use(&corp, &key).await? {
        println!("management key {} is already in use", key.as_str());
        return Ok(());
    }

    let document = Cashbill {
        mgt_key: Some(key.clone()),
        trade_usage: Some("소득공제용".to_owned()),
        trade_type: Some("승인거래".to_owned()),
        taxation_type: Some("과세".to_owned()),
        supply_cost: Some("10000".to_owned()),
        tax: Some("1000".to_owned()),
        service_fee: Some("0".to_owned()),
        total_amount: Some("11000".to_owned()),
        franchise_corp_num: Some(corp.as_str().to_owned()),
        identity_num: Some(identity_num),
        item_name: Some("demo item".to_owned()),
        ..Cashbill::default()
    };

    let registered = cashbill.register(&corp, &document, None).await?;
    println!("register: [{}] {:?}", registered.code, registered.message);

    let issued = cashbill.issue(&corp, &key, Some("issued by demo"), None).await?;
    println!("issue: [{}] {:?}", issued.code, issued.message);

    let info = cashbill.get_info(&corp, &key).await?;
    println!(
        "state: {:?}, confirm number: {:?}",
        info.state_code, info.confirm_num
    );

    Ok(())
}
