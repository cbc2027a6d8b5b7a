#![allow(missing_docs)]
#![allow(dead_code)]

/// A `SiebelMessage` as written by the communication server.
pub const ORIGINAL: &str = concat!(
    "@0*0*34*0*0*0*",
    "8*Comments0*19*RequestLanguageCode3*DEU15*RequestSendFlag1*N",
    "17*RequestLocaleCode0*12*PerfTestMode0*14*RecipientGroup0*",
    "13*CommRequestId0*19*CommProfileOverride20*SiebelReplyContainer",
    "12*SourceBusObj6*Action18*KeepSuccessMessage4*true17*StateFileOverride0*",
    "19*CommRequestParentId0*11*ProcessMode5*Local20*RequestDefaultMedium0*",
    "7*Charset0*11*TestAddress0*12*SourceIdList9*1-4JE0ZIS",
    "16*RecipientBusComp6*Action9*WebServer0*8*NumTasks0*11*RequestName0*",
    "15*PackageNameList40*eMail Response - Auto Acknowledge (HTML)",
    "19*MsgReplyAddressList19*testing@example.com12*TaskRecipMin0*",
    "20*ChildRecipSearchSpec0*13*NumRecipients0*10*CreateOnly1*0",
    "11*MessageType0*15*RequestTimeZone0*13*TaskStartDate0*",
    "15*MessageTracking5*false9*LoginName6*SADMIN16*DefinedComponent0*",
    "15*RecipSearchSpec0*",
);

// The same message cut at awkward seams: inside the header, inside length
// prefixes, right before and after delimiters, and inside field content.
#[rustfmt::skip]
pub const STREAM: [&str; 12] = [
    "@0*0*3",                                                       // inside the property count
    "4*0*0*0*8*Comm",                                               // header end, inside a name
    "ents0*19*RequestLanguageCode3",                                // ends inside a length prefix
    "*DEU15*RequestSendFlag1*N17*RequestLocaleCode0",               // ends right before a delimiter
    "*",                                                            // lone delimiter
    "12*PerfTestMode0*14*RecipientGroup0*13*CommRequestId0*19*CommProfileOverride20*SiebelReplyContainer12*SourceBusObj6*Action18*KeepSuccessMessage4*true17*StateFileOverride0*19*CommRequestParentId0*11*ProcessMode5*Local20*RequestDefaultMedium0*7*Charset0*11*TestAddress0*12*SourceIdList9*1-4JE",
    "0ZIS16*RecipientBusComp6*Action9*WebServer0*8*NumTasks0*11*RequestName0*15*PackageNameList40*eMail Response - Auto Acknowledge (HTML)",
    "19*MsgReplyAddressList19*testing@",                            // inside a value
    "example.com12*TaskRecipMin0*20*ChildRecipSearchSpec0*13*NumRecipients0*10*CreateOnly1*",
    "011*MessageType0*15*RequestTimeZone0*13*TaskStartDate0*15*MessageTracking5*false9*LoginName6*SADMIN",
    "16*DefinedComponent0*15*RecipSearchSpec0",
    "*",
];

/// The same message with one child group holding a multi-byte value.
pub const NESTED: &str = concat!(
    "@0*0*2*1*0*0*",
    "4*Name5*Order6*Status4*Open",
    "2*ListOfItem*",
    "4*Item5*Crème2*Id3*1-7",
);

#[test]
fn assert_stream_example() {
    assert_eq!(STREAM.concat(), ORIGINAL);
}
