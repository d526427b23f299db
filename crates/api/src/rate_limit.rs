//! Rate Limiter fuer die REST-API
//!
//! Token-Bucket pro Client-IP: `max_anfragen` im Zeitfenster `fenster`,
//! gleichmaessig wieder aufgefuellt.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;

/// Konfiguration fuer den Rate Limiter
#[derive(Debug, Clone)]
pub struct RateLimitKonfig {
    /// Maximale Anfragen pro Fenster und IP (= Burst-Limit)
    pub max_anfragen: u32,
    /// Laenge des Zeitfensters
    pub fenster: Duration,
    /// `X-Forwarded-For` als Client-IP verwenden. Nur hinter einem Reverse
    /// Proxy aktivieren, der den Header selbst setzt.
    pub proxy_vertrauen: bool,
}

impl Default for RateLimitKonfig {
    fn default() -> Self {
        Self {
            max_anfragen: 100,
            fenster: Duration::from_secs(15 * 60),
            proxy_vertrauen: false,
        }
    }
}

/// Ein Token-Bucket fuer eine einzelne IP
#[derive(Debug)]
struct TokenBucket {
    /// Aktuelle Token-Anzahl (als f64 fuer Bruchteil-Auffuellung)
    token: f64,
    max_token: f64,
    /// Auffuellrate in Token pro Sekunde
    fuellrate: f64,
    letzte_auffuellung: Instant,
}

impl TokenBucket {
    fn neu(konfig: &RateLimitKonfig) -> Self {
        let max = konfig.max_anfragen as f64;
        let sekunden = konfig.fenster.as_secs_f64().max(1.0);
        Self {
            token: max,
            max_token: max,
            fuellrate: max / sekunden,
            letzte_auffuellung: Instant::now(),
        }
    }

    /// Versucht ein Token zu verbrauchen. Gibt `true` zurueck wenn erlaubt.
    fn verbrauchen(&mut self) -> bool {
        self.auffuellen();
        if self.token >= 1.0 {
            self.token -= 1.0;
            true
        } else {
            false
        }
    }

    /// Sekunden bis zum naechsten verfuegbaren Token
    fn retry_after_secs(&mut self) -> u64 {
        self.auffuellen();
        let fehlend = 1.0 - self.token;
        if fehlend <= 0.0 || self.fuellrate <= 0.0 {
            return 0;
        }
        (fehlend / self.fuellrate).ceil() as u64
    }

    fn auffuellen(&mut self) {
        let jetzt = Instant::now();
        let vergangen = jetzt.duration_since(self.letzte_auffuellung).as_secs_f64();
        self.token = (self.token + vergangen * self.fuellrate).min(self.max_token);
        self.letzte_auffuellung = jetzt;
    }

    fn ist_voll(&mut self) -> bool {
        self.auffuellen();
        self.token >= self.max_token
    }
}

/// Rate Limiter mit Token-Bucket-Algorithmus pro IP
pub struct RateLimiter {
    konfig: RateLimitKonfig,
    ip_buckets: Mutex<HashMap<String, TokenBucket>>,
}

impl RateLimiter {
    pub fn neu(konfig: RateLimitKonfig) -> Arc<Self> {
        Arc::new(Self {
            konfig,
            ip_buckets: Mutex::new(HashMap::new()),
        })
    }

    pub fn konfig(&self) -> &RateLimitKonfig {
        &self.konfig
    }

    /// Prueft und verbraucht ein Token fuer eine IP-Adresse.
    ///
    /// Gibt `Ok(())` zurueck wenn erlaubt, `Err(retry_after_secs)` sonst.
    pub fn pruefe_ip(&self, ip: &str) -> Result<(), u64> {
        let mut buckets = self.ip_buckets.lock();
        let bucket = buckets
            .entry(ip.to_string())
            .or_insert_with(|| TokenBucket::neu(&self.konfig));
        if bucket.verbrauchen() {
            Ok(())
        } else {
            Err(bucket.retry_after_secs())
        }
    }

    /// Entfernt Buckets die wieder voll sind (Speicher-Management).
    ///
    /// Ein voller Bucket verhaelt sich wie ein neu angelegter.
    pub fn cleanup(&self) -> usize {
        let mut buckets = self.ip_buckets.lock();
        let vorher = buckets.len();
        buckets.retain(|_, b| !b.ist_voll());
        vorher - buckets.len()
    }

    pub fn anzahl_buckets(&self) -> usize {
        self.ip_buckets.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn konfig(max: u32, sekunden: u64) -> RateLimitKonfig {
        RateLimitKonfig {
            max_anfragen: max,
            fenster: Duration::from_secs(sekunden),
            proxy_vertrauen: false,
        }
    }

    #[test]
    fn token_bucket_erlaubt_anfragen_bis_limit() {
        let mut bucket = TokenBucket::neu(&konfig(5, 60));
        for _ in 0..5 {
            assert!(bucket.verbrauchen(), "Anfrage sollte erlaubt sein");
        }
        assert!(!bucket.verbrauchen(), "6. Anfrage sollte abgelehnt werden");
    }

    #[test]
    fn standard_ist_100_pro_15_minuten() {
        let k = RateLimitKonfig::default();
        assert_eq!(k.max_anfragen, 100);
        assert_eq!(k.fenster, Duration::from_secs(900));
    }

    #[test]
    fn rate_limiter_ip_pruefung() {
        let limiter = RateLimiter::neu(konfig(3, 900));

        assert!(limiter.pruefe_ip("127.0.0.1").is_ok());
        assert!(limiter.pruefe_ip("127.0.0.1").is_ok());
        assert!(limiter.pruefe_ip("127.0.0.1").is_ok());
        let ergebnis = limiter.pruefe_ip("127.0.0.1");
        assert!(ergebnis.is_err());
        // 3 Token pro 900 s -> ein Token alle 300 s
        let warten = ergebnis.unwrap_err();
        assert!(warten > 0 && warten <= 300, "retry_after = {warten}");
    }

    #[test]
    fn rate_limiter_verschiedene_ips_unabhaengig() {
        let limiter = RateLimiter::neu(konfig(1, 900));

        assert!(limiter.pruefe_ip("192.168.1.1").is_ok());
        assert!(limiter.pruefe_ip("192.168.1.2").is_ok()); // andere IP
        assert!(limiter.pruefe_ip("192.168.1.1").is_err()); // erste IP erschoepft
    }

    #[test]
    fn token_bucket_auffuellung_nach_zeit() {
        // 60 Anfragen pro Minute = 1 pro Sekunde
        let mut bucket = TokenBucket::neu(&konfig(60, 60));
        for _ in 0..60 {
            bucket.verbrauchen();
        }
        bucket.letzte_auffuellung = Instant::now() - Duration::from_secs(2);
        assert!(
            bucket.verbrauchen(),
            "Nach 2 Sekunden sollte 1 Token verfuegbar sein"
        );
    }

    #[test]
    fn cleanup_entfernt_nur_volle_buckets() {
        let limiter = RateLimiter::neu(konfig(10, 900));
        limiter.pruefe_ip("10.0.0.1").unwrap();
        {
            let mut buckets = limiter.ip_buckets.lock();
            buckets.insert("10.0.0.2".into(), TokenBucket::neu(&konfig(10, 900)));
        }
        assert_eq!(limiter.anzahl_buckets(), 2);

        assert_eq!(limiter.cleanup(), 1);
        assert_eq!(limiter.anzahl_buckets(), 1);
    }
}
