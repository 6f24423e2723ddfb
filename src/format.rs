//! 화면 표시용 숫자 포맷. 천 단위 콤마와 소수점 뒤 0 제거를 담당한다.

/// 고정 소수점 문자열로 변환한다. 정확히 중간값이면 0에서 먼 쪽으로 반올림한다.
///
/// `format!("{:.N}")`은 정확한 중간값을 짝수 쪽으로 보내므로, 중간값일 때만
/// 한 ulp 바깥 값으로 옮긴 뒤 포맷한다.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    // -0 은 부호 없이 표시
    let v = if value == 0.0 { 0.0 } else { value };
    let v = if is_exact_half(v, decimals) {
        f64::from_bits(v.to_bits() + 1)
    } else {
        v
    };
    format!("{v:.decimals$}")
}

/// `value × 10^decimals`의 소수부가 정확히 0.5인지 판정한다.
/// 이는 `value × 2^(decimals+1)`이 홀수 정수인 경우와 같다.
fn is_exact_half(value: f64, decimals: usize) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }
    let exp = i32::try_from(decimals).unwrap_or(i32::MAX - 1).saturating_add(1);
    let scaled = value * 2f64.powi(exp);
    scaled.is_finite() && scaled.fract() == 0.0 && (scaled % 2.0).abs() == 1.0
}

/// 숫자 포맷: 천 단위 콤마 + 소수점 `decimals`자리, 뒤쪽 0 제거.
///
/// NaN/무한대는 `"0"`을 반환한다.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format_fixed(value, decimals);
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let grouped = group_thousands(digits);
    if dec_part.bytes().any(|b| b != b'0') {
        let trimmed = dec_part.trim_end_matches('0');
        format!("{sign}{grouped}.{trimmed}")
    } else {
        format!("{sign}{grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 콤마 없는 입력용 문자열로 변환한다. `decimals`자리 반올림 후 불필요한 0을 없앤다.
///
/// 반올림 결과가 0이거나 유한하지 않으면 `None`.
pub fn trim_decimal(value: f64, decimals: usize) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let rounded: f64 = format_fixed(value, decimals).parse().ok()?;
    if rounded == 0.0 || !rounded.is_finite() {
        return None;
    }
    Some(rounded.to_string())
}

/// 문자열 앞부분의 십진수를 읽는다. 숫자가 하나도 없으면 `None`.
///
/// `"5."`은 5, `"12abc"`는 12로 읽는다.
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut digits = 0;
    let mut seen_point = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}
