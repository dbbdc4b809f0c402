/// トーン指定リライトのプロンプトテンプレート
///
/// tone と message はそのまま埋め込まれる。エスケープはしないため、
/// 任意の tone 文字列はプロンプトの指示そのものを書き換えうる。
pub fn build_prompt(message: &str, tone: &str) -> String {
    format!(
        "Rewrite the following message in a {tone} tone.\n\
         Maintain similar length, meaning, and clarity.\n\
         Output only the rewritten message as a single string.\n\
         \n\
         Message: \"{message}\""
    )
}
